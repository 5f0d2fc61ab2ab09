// Dump every field of a pack image for manual inspection.
//
// This is the tool to reach for when a pack will not mount, or mounts and
// looks wrong: it prints the raw label regions word by word, every live
// catalog entry with its file map, the resolved paths, the directory
// trees, and whatever inconsistencies the mount pass collected.

use std::path::PathBuf;
use std::process::exit;

use mxfs::helpers::octal_view::octal_view;
use mxfs::volume::directory::EntryKind;
use mxfs::volume::image::image_struct::ImageFile;
use mxfs::volume::label::label_struct::{
    LABEL_DYN, LABEL_PART, LABEL_PERM, LABEL_REGION_WORDS, LABEL_ROOT,
};
use mxfs::volume::volume_struct::EntryOrigin;
use mxfs::volume::vtoc::catalog::{read_vtoce, slot_count};
use mxfs::volume::{mount, DeviceClass, Geometry};
use mxfs::words::codec::extract_word36;
use mxfs::words::Word36;

fn usage() -> ! {
    eprintln!("usage: mxdump device_type image_path subvolume_count");
    eprintln!("  device_type: 3381 | d501");
    exit(1);
}

fn region(record: &[u8], start: usize) -> Vec<Word36> {
    (start..start + LABEL_REGION_WORDS)
        .map(|i| extract_word36(record, i))
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        usage();
    }
    let Some(class) = DeviceClass::from_cli_name(&args[1]) else {
        eprintln!("unknown device type `{}`", args[1]);
        usage();
    };
    let image_path = PathBuf::from(&args[2]);
    let Ok(subvolumes) = args[3].parse::<usize>() else {
        eprintln!("subvolume count `{}` is not a number", args[3]);
        usage();
    };

    // Raw label regions first, straight off the image, so there is output
    // to stare at even when the mount proper refuses.
    let geometry = match Geometry::new(class, subvolumes) {
        Ok(geometry) => geometry,
        Err(err) => {
            eprintln!("mxdump: {err}");
            exit(1);
        }
    };
    let mut image = match ImageFile::open(&image_path, geometry) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("mxdump: {err}");
            exit(1);
        }
    };

    for sv in 0..subvolumes {
        let record = match image.read_record(0, sv) {
            Ok(record) => record,
            Err(err) => {
                eprintln!("mxdump: {err}");
                exit(1);
            }
        };
        println!("\nsv {}", (b'a' + sv as u8) as char);
        println!("  permanent label:");
        print!("{}", octal_view(&region(&record, LABEL_PERM)));
        println!("  dynamic region:");
        print!("{}", octal_view(&region(&record, LABEL_DYN)));
        println!("  root region:");
        print!("{}", octal_view(&region(&record, LABEL_ROOT)));
        println!("  partition region:");
        print!("{}", octal_view(&region(&record, LABEL_PART)));
    }

    // Raw catalog slots, with their on-pack location and the length fields
    // the model does not carry.
    for sv in 0..subvolumes {
        let slots = match slot_count(&mut image, class, sv) {
            Ok(slots) => slots,
            Err(err) => {
                eprintln!("mxdump: {err}");
                exit(1);
            }
        };
        println!("\nsv {} catalog: {slots} slots", (b'a' + sv as u8) as char);
        for slot in 0..slots {
            let raw = match read_vtoce(&mut image, class, slot, sv) {
                Ok(raw) => raw,
                Err(err) => {
                    eprintln!("mxdump: {err}");
                    exit(1);
                }
            };
            if raw.uid() == 0 {
                continue;
            }
            println!(
                "  {slot:5o} [{:5o}:{:4o}] uid {:012o} msl {} csl {} recs {} '{}'",
                raw.record,
                raw.offset,
                raw.uid(),
                raw.max_length(),
                raw.current_length(),
                raw.record_count(),
                mxfs::helpers::chars::trimmed_packed_string(raw.name_words()),
            );
        }
    }
    drop(image);

    let volume = match mount(&image_path, class, subvolumes) {
        Ok(volume) => volume,
        Err(err) => {
            eprintln!("mxdump: {err}");
            exit(1);
        }
    };

    for label in volume.labels() {
        println!(
            "\nsv {}: pv '{}' lv '{}' root_here {} root_slot {} cleanly_dismounted {}",
            (b'a' + label.subvolume as u8) as char,
            label.pv_name,
            label.lv_name,
            label.root_here,
            label.root_slot,
            label.cleanly_dismounted(),
        );
        for part in &label.partitions {
            println!(
                "    partition '{}': first record {} for {} records",
                part.name, part.first_record, part.records
            );
        }
    }

    println!("\ncatalog ({:?} slots per subvolume):", volume.report().slots_scanned);
    for (index, entry) in volume.entries().iter().enumerate() {
        let EntryOrigin::Catalog { subvolume, slot } = entry.origin else {
            continue;
        };
        println!(
            "  {index:5}. sv {subvolume} slot {slot:5o} uid {:012o} {:?} '{}'",
            entry.uid, entry.attributes, entry.name
        );
        for row in entry.file_map.chunks(8) {
            let cells: Vec<String> = row.iter().map(|r| format!("{r:8}")).collect();
            println!("          {}", cells.join(""));
        }
    }

    println!("\npaths:");
    for (index, entry) in volume.entries().iter().enumerate() {
        println!("  {index:5} {}", entry.full_path);
    }

    println!("\ndirectories:");
    for entry in volume.entries() {
        if !entry.is_directory() {
            continue;
        }
        println!("  {}", entry.full_path);
        for child in &entry.children {
            match child.kind {
                EntryKind::Link => println!(
                    "    link    {:012o} '{}' -> '{}'",
                    child.uid,
                    child.name,
                    child.link_target.as_deref().unwrap_or(""),
                ),
                kind => println!(
                    "    {kind:?}  {:012o} '{}' {} bytes",
                    child.uid,
                    child.name,
                    child.byte_length()
                ),
            }
        }
    }

    let report = volume.report();
    println!("\nconsistency:");
    println!("  dirty subvolumes: {:?}", report.dirty_subvolumes);
    for dup in &report.duplicate_allocations {
        println!(
            "  record {} of sv {} claimed by slot {} (map {}) and slot {} (map {})",
            dup.record, dup.subvolume, dup.first.0, dup.first.1, dup.second.0, dup.second.1
        );
    }
    for mismatch in &report.count_mismatches {
        println!(
            "  '{}' declares {} entries, chain holds {}",
            volume.entry(mismatch.entry).full_path,
            mismatch.declared,
            mismatch.walked
        );
    }
    for (index, err) in &report.unparsed_directories {
        println!("  '{}' not parsed: {err}", volume.entry(*index).full_path);
    }
}
