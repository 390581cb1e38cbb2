//! tilec binary

use std::process;
use tilec::{TileError, TilecCli};

fn main() {
    let mut cli = TilecCli::new();

    match cli.run() {
        Ok(()) => {}
        Err(TileError::Io(e)) => {
            eprintln!("IO Error: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
