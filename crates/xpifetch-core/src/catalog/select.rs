//! First-match install selection.

use super::InstallEntry;
use crate::platform::OperatingSystem;

/// Returns the first non-beta entry, in document order, whose platform is
/// `ALL` or equal to `host`. Position wins over specificity: a later
/// OS-specific entry never displaces an earlier `ALL` one, and vice versa.
pub(crate) fn first_eligible(installs: &[InstallEntry], host: OperatingSystem) -> Option<&InstallEntry> {
    for (idx, entry) in installs.iter().enumerate() {
        if entry.is_eligible_for(host) {
            if installs[idx + 1..].iter().any(|e| e.is_eligible_for(host)) {
                tracing::warn!("multiple install options found for {}, choosing the first", host);
            }
            return Some(entry);
        }
    }
    None
}
