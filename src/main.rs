use blockmap_reader::{BlockMapReader, FsDataSource, PropertyRegistry};
use std::env;

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} <data-dir> <registry-file> <region> <blockX> <blockY>",
        program
    );
    eprintln!("       {} <data-dir> <registry-file> --scan <region>", program);
    eprintln!();
    eprintln!("  <data-dir>       directory of exported resources (<ID>.bin, map_<region>/<ID>.bin)");
    eprintln!("  <registry-file>  property registry dump (`<id> <name> <kind>` per line)");
    std::process::exit(1);
}

fn parse_number(text: &str, what: &str) -> u32 {
    match text.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("ERROR: Invalid {}: {}", what, text);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 5 {
        usage(&args[0]);
    }

    let data_dir = &args[1];
    let registry_file = &args[2];

    let registry = match PropertyRegistry::load(registry_file) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("ERROR: Failed to load property registry from {}", registry_file);
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };
    println!("Property registry: {} definitions", registry.len());

    let reader = BlockMapReader::new(FsDataSource::new(data_dir), &registry);
    for failure in reader.pools().failures() {
        eprintln!(
            "WARNING: Region {} has no pool (descriptor {:#010x}): {}",
            failure.region, failure.resource_id, failure.error
        );
    }

    if args[3] == "--scan" {
        let region = parse_number(&args[4], "region");
        scan_region(&reader, region);
    } else {
        if args.len() < 6 {
            usage(&args[0]);
        }
        let region = parse_number(&args[3], "region");
        let block_x = parse_number(&args[4], "blockX");
        let block_y = parse_number(&args[5], "blockY");
        decode_one(&reader, region, block_x, block_y);
    }
}

fn decode_one(reader: &BlockMapReader<FsDataSource>, region: u32, block_x: u32, block_y: u32) {
    match reader.decode_block(region, block_x, block_y) {
        Ok(Some(block)) => {
            println!(
                "Block map {:#010x} (region {}, block {}/{}): {} properties",
                block.id,
                region,
                block_x,
                block_y,
                block.properties.len()
            );
            let mut entries: Vec<_> = block.properties.iter().collect();
            entries.sort_by_key(|(name, _)| *name);
            for (name, value) in entries {
                println!("  {} = {}", name, value);
            }
            // The import tooling expects every populated block to carry an area id.
            if !block.properties.contains("Area_DID") {
                println!("WARNING: no Area_DID for this block");
            }
            for diagnostic in &block.diagnostics {
                println!("WARNING: {}", diagnostic);
            }
        }
        Ok(None) => {
            println!(
                "No block map data for region {}, block {}/{}",
                region, block_x, block_y
            );
        }
        Err(e) => {
            eprintln!("ERROR: Failed to decode block map");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}

/// Sweep the full 256x256 grid of a region. Bad records are reported and
/// skipped; a corrupt record must never stop a run.
fn scan_region(reader: &BlockMapReader<FsDataSource>, region: u32) {
    let mut decoded = 0u32;
    let mut missing = 0u32;
    let mut failed = 0u32;
    let mut with_diagnostics = 0u32;

    for block_x in 0..=0xFF {
        for block_y in 0..=0xFF {
            match reader.decode_block(region, block_x, block_y) {
                Ok(Some(block)) => {
                    decoded += 1;
                    if !block.diagnostics.is_empty() {
                        with_diagnostics += 1;
                    }
                }
                Ok(None) => missing += 1,
                Err(e) => {
                    failed += 1;
                    eprintln!("WARNING: block {}/{}: {}", block_x, block_y, e);
                }
            }
        }
    }

    println!("Region {} scan complete:", region);
    println!("  Decoded blocks:   {}", decoded);
    println!("  Empty slots:      {}", missing);
    println!("  Failed records:   {}", failed);
    println!("  With diagnostics: {}", with_diagnostics);
}
