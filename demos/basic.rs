//! Basic usage: registration order, one-shot handlers, async dispatch.
//!
//! Run with: `cargo run --example basic`

use eventry::{arg, AsyncHandlerFn, Emitter, HandlerFn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter = Emitter::new();

    emitter
        .on(
            "message",
            HandlerFn::arc(|args| {
                let text = args[0]
                    .downcast_ref::<String>()
                    .ok_or_else(|| eventry::HandlerError::fail("expected text"))?;
                println!("[sync] {text}");
                Ok(())
            }),
        )?
        .once(
            "message",
            HandlerFn::arc(|_args| {
                println!("[sync] first delivery only");
                Ok(())
            }),
        )?
        .on(
            "message",
            AsyncHandlerFn::arc(|args| async move {
                let text = args[0]
                    .downcast_ref::<String>()
                    .ok_or_else(|| eventry::HandlerError::fail("expected text"))?;
                tokio::task::yield_now().await;
                println!("[async] {text}");
                Ok(())
            }),
        )?;

    emitter
        .emit_async("message", &[arg(String::from("hello"))])
        .await?;
    emitter
        .emit_async("message", &[arg(String::from("hello again"))])
        .await?;

    let delivered = emitter.emit_async("silence", &[]).await?;
    println!("handlers for \"silence\": {delivered}");

    Ok(())
}
