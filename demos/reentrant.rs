//! Mutating the handler set from inside a dispatch of the same key.
//!
//! Shows the deferred-visibility contract: handlers added during a pass
//! first run on the *next* emit, and a handler removed mid-pass still
//! finishes the pass it was snapshotted into.
//!
//! Run with: `cargo run --example reentrant`

use std::sync::Arc;

use eventry::{Emitter, HandlerFn, HandlerRef};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let emitter = Arc::new(Emitter::new());

    let farewell: HandlerRef = HandlerFn::arc(|_args| {
        println!("  farewell");
        Ok(())
    });

    let expander = {
        let emitter = Arc::clone(&emitter);
        let farewell = farewell.clone();
        HandlerFn::arc(move |_args| {
            println!("  expander: scheduling a late handler, dropping farewell");
            emitter
                .on(
                    "tick",
                    HandlerFn::arc(|_args| {
                        println!("  late handler");
                        Ok(())
                    }),
                )
                .map_err(|err| eventry::HandlerError::fail(err.to_string()))?;
            emitter.remove_listener("tick", &farewell);
            Ok(())
        })
    };

    emitter.on("tick", expander)?.on("tick", farewell)?;

    println!("first emit (farewell still runs, late handler deferred):");
    emitter.emit("tick", &[])?;

    println!("second emit (farewell gone, late handler active):");
    emitter.emit("tick", &[])?;

    Ok(())
}
