use std::env;
use std::fs;
use std::process::exit;

use markerparser::{OutputFormat, TargetReferencePoint};

fn main() {
    // Logging
    env_logger::init();

    // Argument parsing
    let args: Vec<_> = env::args().collect();
    match args.len() {
        2 => {}
        _ => {
            println!("Usage: {} <path/to/markers.sqf>", args[0]);
            exit(1);
        }
    };

    // Load file
    let s = fs::read_to_string(&args[1]).unwrap();

    // Parse data
    let trps: Vec<TargetReferencePoint> = markerparser::parse_entries(&s).unwrap_or_else(|e| {
        println!("Error: {}", e);
        exit(2);
    });

    // Print data
    println!("Found {} trps.", trps.len());
    for trp in &trps {
        println!("- {} at {:?}", trp.name, trp.coords);
    }
    println!(
        "{}",
        markerparser::serialize(&trps, OutputFormat::PaddedWithCoords)
    );
}
