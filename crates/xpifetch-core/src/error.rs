//! Failure taxonomy for a single addon fetch.
//!
//! Every variant is fatal to the addon being processed; nothing here is
//! retried. Whether a batch continues after a failure is up to the caller.

use crate::catalog::AddonId;
use crate::platform::OperatingSystem;
use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Catalog query failed at the transport level or returned non-2xx.
    #[error("catalog unreachable for addon {addon_id}")]
    CatalogUnreachable {
        addon_id: AddonId,
        #[source]
        source: TransportError,
    },

    /// Catalog body is not a usable `<addon>` document.
    #[error("catalog response for addon {addon_id} is malformed: {reason}")]
    CatalogMalformed { addon_id: AddonId, reason: String },

    /// No non-beta install is eligible for the host OS.
    #[error("no suitable install for addon {addon_id} on {os}")]
    NoSuitableInstall {
        addon_id: AddonId,
        os: OperatingSystem,
    },

    #[error("unsupported digest algorithm in {declared:?}")]
    UnsupportedDigestAlgorithm { declared: String },

    #[error("download of {url} failed")]
    DownloadFailed {
        url: String,
        #[source]
        source: TransportError,
    },

    /// Downloaded content does not hash to the catalog's declared digest.
    #[error("integrity mismatch for {url}: catalog declared {expected}, content is {actual}")]
    IntegrityMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("addon {name:?} has unknown source {source_kind:?}")]
    UnknownSource { name: String, source_kind: String },

    /// Descriptor lacks the field its source needs, or carries an invalid value.
    #[error("addon {name:?}: {reason}")]
    InvalidDescriptor { name: String, reason: String },
}

pub type FetchResult<T> = Result<T, FetchError>;
