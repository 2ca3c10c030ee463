//! File formats around the catalog pipeline: semicolon-delimited dump
//! record rows in, master lists in, CSV reports out.

pub mod error;
pub mod master;
pub mod records;
pub mod report;

pub use error::ImportError;
pub use master::{read_master_file, read_master_lists};
pub use records::{RecordSource, Records};
pub use report::{
    DERIVED_ONLY_FILE, DISJOINT_CODES_FILE, MASTER_ONLY_FILE, SHARED_CODES_FILE, write_code_list,
    write_derived_only, write_diff_report, write_disjoint_codes, write_master_only,
    write_shared_codes, write_shared_report,
};
