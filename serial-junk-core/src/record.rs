/// One reading of one physical cartridge, as collected from the dump
/// database.
///
/// Several records may share a `hash` when the same image was dumped from
/// more than one cartridge. Records are never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpRecord {
    /// Content hash of the dump image (MD5, lowercase hex upstream).
    pub hash: String,
    /// Free-text release name; may embed `(Rev A)`, region and status tags.
    pub name: String,
    /// Serial printed on the cartridge label. Free text, may be empty,
    /// `none` or `unk`.
    pub label_serial: String,
    /// Code stamped on the ROM chip. Authoritative when non-empty.
    pub chip_code: String,
    /// Whether the dump was verified against a known-good checksum.
    pub is_good_dump: bool,
}

impl DumpRecord {
    pub fn new(
        hash: impl Into<String>,
        name: impl Into<String>,
        label_serial: impl Into<String>,
        chip_code: impl Into<String>,
        is_good_dump: bool,
    ) -> Self {
        Self {
            hash: hash.into(),
            name: name.into(),
            label_serial: label_serial.into(),
            chip_code: chip_code.into(),
            is_good_dump,
        }
    }
}
