// Mount a Multics pack image and go exploring.

use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::exit;

use log::error;

use mxfs::filesystem::MxFs;
use mxfs::volume::{mount, DeviceClass};

fn usage() -> ! {
    eprintln!("usage: mxfs device_type image_path subvolume_count mountpoint");
    eprintln!("  device_type: 3381 | d501");
    exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 5 {
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
    let mountpoint = PathBuf::from(&args[4]);

    let volume = match mount(&image_path, class, subvolumes) {
        Ok(volume) => volume,
        Err(err) => {
            error!("mount failed: {err}");
            eprintln!("mxfs: {err}");
            exit(1);
        }
    };

    // Zero threads: the model serializes on the image handle anyway, so
    // there is nothing to win by letting the kernel fan requests out.
    let fs = fuse_mt::FuseMT::new(MxFs::new(volume), 0);

    let options = [
        OsStr::new("-oro"),       // Read only, obviously
        OsStr::new("-onodev"),    // Disable dev devices
        OsStr::new("-onosuid"),   // No setuid surprises from a 1980s pack
        OsStr::new("-onoatime"),  // No access times (where would they go?)
        OsStr::new("-ofsname=mxfs"),
    ];

    if let Err(err) = fuse_mt::mount(fs, &mountpoint, &options) {
        eprintln!("mxfs: fuse mount failed: {err}");
        exit(1);
    }
}
