use std::{collections::TryReserveError, fmt};

/// A condition the table cannot recover from.
///
/// Faults never travel through `Result`. A bucket array that could not be
/// allocated leaves a resize half done, so the process is aborted by
/// [`fatal`] instead of unwinding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fault {
    /// The allocator refused a new bucket array.
    BucketArrayAllocation {
        buckets: usize,
        source: TryReserveError,
    },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BucketArrayAllocation { buckets, source } => {
                write!(
                    f,
                    "failed to allocate a bucket array of {buckets} buckets: {source}"
                )
            }
        }
    }
}

#[cold]
#[inline(never)]
pub(crate) fn fatal(fault: Fault, _table_name: Option<&str>) -> ! {
    #[cfg(feature = "logging")]
    {
        let tn = _table_name
            .map(|name| format!("[{name}] "))
            .unwrap_or_default();
        log::error!("{tn}Aborting the process: {fault}");
    }

    // Without the `logging` feature the fault goes to stderr.
    #[cfg(not(feature = "logging"))]
    eprintln!("strset: aborting the process: {fault}");

    std::process::abort()
}
