//! Result emission — compact serialization, depth cap, exit status.

use std::io::{self, Write};
use std::process::ExitCode;

use modrun_types::ModuleResult;

/// Maximum nesting depth a result object may serialize with.
pub const MAX_RESULT_DEPTH: usize = 99;

/// A finalized result plus the exit status it carries.
///
/// Emissions are plain values: nothing here touches the process. The
/// top-level handler in [`crate::exec_module`] writes the emission and
/// turns it into the process exit status.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    result: ModuleResult,
    status: u8,
}

impl Emission {
    /// Successful emission: `changed` ensured, exit status 0.
    ///
    /// A result nested deeper than [`MAX_RESULT_DEPTH`] cannot be
    /// serialized and is replaced by a failure emission.
    pub fn success(mut result: ModuleResult) -> Self {
        result.ensure_changed();
        if result.nesting_depth() > MAX_RESULT_DEPTH {
            return Self::failure(
                ModuleResult::new(),
                format!("result exceeds maximum nesting depth of {MAX_RESULT_DEPTH}"),
            );
        }
        Self { result, status: 0 }
    }

    /// Failure emission: sets `msg` and `failed: true`, ensures `changed`,
    /// exit status 1.
    pub fn failure(mut result: ModuleResult, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        result.set_msg(msg.clone());
        result.insert("failed", true);
        result.ensure_changed();
        if result.nesting_depth() > MAX_RESULT_DEPTH {
            result = ModuleResult::failure(msg);
            result.ensure_changed();
        }
        Self { result, status: 1 }
    }

    /// Skip emission: `skipped: true`, `changed: false`, exit status 0.
    pub fn skip(msg: impl Into<String>) -> Self {
        Self {
            result: ModuleResult::skipped(msg),
            status: 0,
        }
    }

    /// Serialize the result as one compact JSON object plus newline.
    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        let body = serde_json::to_string(&self.result).map_err(io::Error::other)?;
        writeln!(writer, "{body}")
    }

    /// The exit status this emission carries.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status)
    }

    /// True if the emission exits with status 0.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// The final result object.
    pub fn result(&self) -> &ModuleResult {
        &self.result
    }
}
