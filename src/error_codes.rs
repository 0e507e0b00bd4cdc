//! linkeddoc error codes
//!
//! Error codes follow the pattern: LD-{CATEGORY}-{3-digit number}
//!
//! Categories:
//! - IO: file system errors (missing root, stat/read failures)
//! - GRM: grammar errors in a metadata block
//! - STO: triple store rejected a triple
//! - RES: dependency resolution problems
//! - VAL: graph validation findings
//! - SCN: scan/build policy aborts
//!
//! Each error code is stable and should not be reused.

/// Path does not exist
pub const LD_IO_001_NOT_FOUND: &str = "LD-IO-001";

/// Directory traversal failed (permission denied, symlink loop)
pub const LD_IO_002_WALK_FAILED: &str = "LD-IO-002";

/// File metadata could not be read
pub const LD_IO_003_STAT_FAILED: &str = "LD-IO-003";

/// File contents could not be read
pub const LD_IO_004_READ_FAILED: &str = "LD-IO-004";

/// Ignore file exists but could not be read
pub const LD_IO_005_IGNORE_FILE: &str = "LD-IO-005";

/// Metadata block start marker without an end marker
pub const LD_GRM_001_BLOCK_NOT_CLOSED: &str = "LD-GRM-001";

/// Malformed `@prefix` declaration
pub const LD_GRM_002_MALFORMED_PREFIX: &str = "LD-GRM-002";

/// Any other syntax error inside a block
pub const LD_GRM_003_SYNTAX: &str = "LD-GRM-003";

/// Triple store rejected a triple
pub const LD_STO_001_REJECTED: &str = "LD-STO-001";

/// Declared dependency does not match any module
pub const LD_RES_001_UNRESOLVED: &str = "LD-RES-001";

/// Two modules share one declared URI
pub const LD_VAL_001_DUPLICATE_URI: &str = "LD-VAL-001";

/// Dependency reference matches no module (warning)
pub const LD_VAL_101_UNRESOLVED_DEPENDENCY: &str = "LD-VAL-101";

/// Module lists itself as a dependency (warning)
pub const LD_VAL_102_SELF_DEPENDENCY: &str = "LD-VAL-102";

/// Module sits on a dependency cycle (warning)
pub const LD_VAL_103_DEPENDENCY_CYCLE: &str = "LD-VAL-103";

/// Strict mode stopped at the first error
pub const LD_SCN_001_STRICT_ABORT: &str = "LD-SCN-001";

/// Error count went past the configured maximum
pub const LD_SCN_002_THRESHOLD: &str = "LD-SCN-002";

/// Overall deadline passed
pub const LD_SCN_003_TIMEOUT: &str = "LD-SCN-003";

/// Error code documentation
///
/// | Code | Description | Remediation |
/// |------|-------------|-------------|
/// | LD-IO-001 | Path not found | Check the scan root or dependency path |
/// | LD-IO-002 | Walk failed | Check directory permissions and symlink loops |
/// | LD-IO-003 | Stat failed | Check file permissions |
/// | LD-IO-004 | Read failed | Check file permissions; file may have been removed mid-scan |
/// | LD-IO-005 | Ignore file unreadable | Fix permissions on the ignore file |
/// | LD-GRM-001 | Block not closed | Add `<!-- End LinkedDoc RDF -->` after the block |
/// | LD-GRM-002 | Malformed prefix | Use `@prefix name: <uri> .` |
/// | LD-GRM-003 | Syntax error | Check separators (`;` `,` `.`) and brackets |
/// | LD-STO-001 | Store rejected triple | See the store's error message |
/// | LD-RES-001 | Unresolved dependency | Declare metadata in the target file or fix the path |
/// | LD-VAL-001 | Duplicate module URI | Give each module a unique subject |
/// | LD-SCN-001 | Strict abort | Fix the first reported error or disable strict mode |
/// | LD-SCN-002 | Too many errors | Raise `max_errors` or fix the reported files |
/// | LD-SCN-003 | Timeout | Raise the timeout or narrow the scan |
pub fn describe(code: &str) -> Option<&'static str> {
    let text = match code {
        LD_IO_001_NOT_FOUND => "path not found",
        LD_IO_002_WALK_FAILED => "directory traversal failed",
        LD_IO_003_STAT_FAILED => "file metadata unavailable",
        LD_IO_004_READ_FAILED => "file unreadable",
        LD_IO_005_IGNORE_FILE => "ignore file unreadable",
        LD_GRM_001_BLOCK_NOT_CLOSED => "metadata block not closed",
        LD_GRM_002_MALFORMED_PREFIX => "malformed prefix declaration",
        LD_GRM_003_SYNTAX => "metadata syntax error",
        LD_STO_001_REJECTED => "triple store rejected triple",
        LD_RES_001_UNRESOLVED => "unresolved dependency",
        LD_VAL_001_DUPLICATE_URI => "duplicate module URI",
        LD_VAL_101_UNRESOLVED_DEPENDENCY => "unresolved dependency",
        LD_VAL_102_SELF_DEPENDENCY => "module depends on itself",
        LD_VAL_103_DEPENDENCY_CYCLE => "dependency cycle",
        LD_SCN_001_STRICT_ABORT => "strict mode abort",
        LD_SCN_002_THRESHOLD => "error threshold exceeded",
        LD_SCN_003_TIMEOUT => "deadline exceeded",
        _ => return None,
    };
    Some(text)
}
