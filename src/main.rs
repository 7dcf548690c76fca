//! Person RPC - Main entry point
//!
//! A gRPC service exposing create/read/update/delete over an in-memory
//! store of person records keyed by integer id.
//!
//! ## Usage
//!
//! Start the server:
//! ```bash
//! cargo run --bin person-server -- --listen-addr 0.0.0.0:8080
//! ```
//!
//! Run the client:
//! ```bash
//! cargo run --bin person-client                 # full walkthrough
//! cargo run --bin person-client -- create "John Wick" john.wick@test.com 123-456-789
//! cargo run --bin person-client -- read 1
//! ```

fn main() {
    println!("Person RPC");
    println!();
    println!("Use the following binaries:");
    println!("  cargo run --bin person-server -- --help");
    println!("  cargo run --bin person-client -- --help");
}
