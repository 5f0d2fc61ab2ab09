// Device geometry.
//
// The pack image is addressed three different ways depending on who you ask:
// bytes (the host file), sectors (the drive), and 1024-word Multics records
// (everything in the filesystem layer). The constants that tie those
// together depend on which drive model wrote the pack, and the image does
// not reliably self-describe, so the caller has to say what it is.

/// A sector holds 512 36-bit words...
pub const SECTOR_WORDS: usize = 512;
/// ...which pack into 9 bytes per 2 words.
pub const SECTOR_BYTES: usize = (36 * SECTOR_WORDS) / 8;

/// A Multics record is two sectors, 1024 words.
pub const RECORD_WORDS: usize = 1024;
pub const RECORD_BYTES: usize = 2 * SECTOR_BYTES;

/// The catalog always starts at record 8 of each subvolume,
pub const VTOC_ORIGIN_RECORD: usize = 8;
/// with its header back at record 4.
pub const VTOC_HEADER_RECORD: usize = 4;

/// The two drive families we can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// FIPS 3380/3381 disks: 255 sectors per cylinder, catalog entries come
    /// two to a record, each a full 512 words.
    Fips3381,
    /// MSU0501 packs: 1280 sectors per cylinder, catalog entries come five
    /// to a record at 192 words apiece.
    Msu0501,
}

impl DeviceClass {
    /// Parse the name used on the command line.
    pub fn from_cli_name(name: &str) -> Option<Self> {
        match name {
            "3380" | "3381" => Some(Self::Fips3381),
            "d501" => Some(Self::Msu0501),
            _ => None,
        }
    }

    pub const fn sectors_per_cylinder(self) -> usize {
        match self {
            Self::Fips3381 => 255,
            Self::Msu0501 => 1280,
        }
    }

    /// Same for both families (the 0501 is addressed through the same
    /// 512-word sector math as the FIPS drives; see the device tables).
    pub const fn sectors_per_record(self) -> usize {
        2
    }

    pub const fn vtoc_entries_per_record(self) -> usize {
        match self {
            Self::Fips3381 => 2,
            Self::Msu0501 => 5,
        }
    }

    /// How many words of a record one catalog entry occupies.
    pub const fn vtoc_entry_words(self) -> usize {
        match self {
            Self::Fips3381 => 512,
            Self::Msu0501 => 192,
        }
    }
}

/// Geometry of one mounted pack: the drive family plus how many subvolumes
/// are interleaved across it. Fixed for the lifetime of the mount.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub class: DeviceClass,
    pub subvolumes: usize,
}
