#[macro_use]
extern crate clap;
extern crate chrono;
extern crate fealcrack;

use chrono::Local;
use clap::App;
use fealcrack::{Attack, Data};
use std::process;
use std::time::Instant;

fn now() -> String {
    Local::now().format("%T").to_string()
}

fn main() {
    let yaml = load_yaml!("../cli.yml");
    let matches = App::from_yaml(yaml).get_matches();

    let pairfile = matches.value_of("pairs").unwrap_or("known.txt");

    println!("FEAL-4 Linear Cryptanalysis Attack");
    println!("===================================");
    println!("[{}] Loading known pairs from {}", now(), pairfile);

    let data = match Data::new(pairfile) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    println!("[{}] Loaded {} plaintext-ciphertext pairs", now(), data.len());
    println!("[{}] Starting attack...", now());

    let start = Instant::now();
    let keys = Attack::new(&data).carry_out();
    let elapsed = start.elapsed();

    if keys.len() >= Attack::MAX_VALID_KEYS {
        println!("\nAttack completed successfully!");
    } else {
        println!("\nAttack completed.");
    }
    println!("Found {} valid keys in {} ms", keys.len(), elapsed.as_millis());
}
