//! ZIP extraction constants.

/// Entry name looked up when the caller does not override it.
pub const C_NAME_ENTRY_DEFAULT: &str = "students.json";
/// Upper bound on the decompressed size of the target entry (64 MiB).
pub const N_SIZE_ENTRY_MAX_DEFAULT: u64 = 64 * 1024 * 1024;

/// End-of-central-directory signature (`PK\x05\x06`), first record of an empty archive.
pub const V_SIG_END_OF_CENTRAL_DIR: [u8; 4] = [0x50, 0x4b, 0x05, 0x06];
