//! Fetch paths and the session that dispatches between them.
//!
//! `AddonSource::Amo` goes through the catalog and is verified against the
//! declared digest; `AddonSource::Url` is a plain download.

mod direct;
mod package;

pub use direct::DirectFetcher;
pub use package::{FetchStage, PackageFetcher};

use crate::catalog::{AddonId, CatalogDescriptor, CatalogResolver, InstallOption};
use crate::error::FetchResult;
use crate::transport::Transport;

/// Where an addon package comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddonSource {
    /// Catalog-listed addon, verified against the catalog's digest.
    Amo { amoid: AddonId },
    /// Direct URL, not verified.
    Url { url: String },
}

/// Downloaded package content. Only constructed by the fetch paths, after
/// verification on the catalog path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageBytes(Vec<u8>);

impl PackageBytes {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        PackageBytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for PackageBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// One transport shared by both fetch paths. Addons are processed one at a
/// time through `&mut self`.
pub struct Session<T: Transport> {
    transport: T,
    package: PackageFetcher,
    direct: DirectFetcher,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, resolver: CatalogResolver) -> Self {
        Session {
            transport,
            package: PackageFetcher::new(resolver),
            direct: DirectFetcher,
        }
    }

    pub fn resolver(&self) -> &CatalogResolver {
        self.package.resolver()
    }

    pub fn fetch(&mut self, source: &AddonSource) -> FetchResult<PackageBytes> {
        match source {
            AddonSource::Amo { amoid } => self.package.fetch(&mut self.transport, *amoid),
            AddonSource::Url { url } => self.direct.fetch(&mut self.transport, url),
        }
    }

    /// Catalog selection only, no download.
    pub fn resolve(&mut self, addon_id: AddonId) -> FetchResult<InstallOption> {
        self.package.resolver().resolve(&mut self.transport, addon_id)
    }

    pub fn describe(&mut self, addon_id: AddonId) -> FetchResult<CatalogDescriptor> {
        self.package.resolver().describe(&mut self.transport, addon_id)
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::integrity::DigestAlgorithm;
    use crate::platform::OperatingSystem;
    use crate::transport::testing::StaticTransport;

    const BASE: &str = "https://catalog.test/addon";
    const PACKAGE_URL: &str = "https://files.test/addon-1.0.xpi";

    fn catalog_for(digest: &str) -> String {
        format!(
            r#"<addon><install os="ALL" hash="{}">{}</install></addon>"#,
            digest, PACKAGE_URL
        )
    }

    fn session(transport: StaticTransport) -> Session<StaticTransport> {
        Session::new(transport, CatalogResolver::with_os(BASE, OperatingSystem::Linux))
    }

    #[test]
    fn verified_fetch_returns_body() {
        let body = b"PK\x03\x04 pretend xpi".to_vec();
        let digest = DigestAlgorithm::Sha256.digest(&body).to_string();
        let transport = StaticTransport::new()
            .with_body(&format!("{}/1", BASE), catalog_for(&digest))
            .with_body(PACKAGE_URL, body.clone());
        let mut s = session(transport);

        let got = s.fetch(&AddonSource::Amo { amoid: 1 }).unwrap();
        assert_eq!(got.as_bytes(), body.as_slice());
        assert_eq!(
            s.into_transport().requests,
            vec![format!("{}/1", BASE), PACKAGE_URL.to_string()]
        );
    }

    #[test]
    fn tampered_body_is_rejected() {
        let body = b"original".to_vec();
        let digest = DigestAlgorithm::Sha256.digest(&body).to_string();
        let transport = StaticTransport::new()
            .with_body(&format!("{}/1", BASE), catalog_for(&digest))
            .with_body(PACKAGE_URL, b"tampered".to_vec());

        match session(transport).fetch(&AddonSource::Amo { amoid: 1 }) {
            Err(FetchError::IntegrityMismatch {
                url,
                expected,
                actual,
            }) => {
                assert_eq!(url, PACKAGE_URL);
                assert_eq!(expected, digest);
                assert_eq!(actual, DigestAlgorithm::Sha256.digest(b"tampered").to_string());
            }
            other => panic!("expected IntegrityMismatch, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_digest_fails_before_download() {
        let transport = StaticTransport::new()
            .with_body(&format!("{}/1", BASE), catalog_for("md5:abcd"))
            .with_body(PACKAGE_URL, b"x".to_vec());
        let mut s = session(transport);
        assert!(matches!(
            s.fetch(&AddonSource::Amo { amoid: 1 }),
            Err(FetchError::UnsupportedDigestAlgorithm { .. })
        ));
        assert_eq!(s.into_transport().requests.len(), 1);
    }

    #[test]
    fn download_failure_is_download_failed() {
        let transport = StaticTransport::new()
            .with_body(&format!("{}/1", BASE), catalog_for("sha256:00"))
            .with_status(PACKAGE_URL, 500);
        match session(transport).fetch(&AddonSource::Amo { amoid: 1 }) {
            Err(FetchError::DownloadFailed { url, .. }) => assert_eq!(url, PACKAGE_URL),
            other => panic!("expected DownloadFailed, got {other:?}"),
        }
    }

    #[test]
    fn resolver_errors_propagate_unchanged() {
        let transport = StaticTransport::new().with_status(&format!("{}/9", BASE), 404);
        assert!(matches!(
            session(transport).fetch(&AddonSource::Amo { amoid: 9 }),
            Err(FetchError::CatalogUnreachable { addon_id: 9, .. })
        ));
    }

    #[test]
    fn direct_fetch_skips_catalog_and_verification() {
        let url = "https://mirror.test/theme.xpi";
        let transport = StaticTransport::new().with_body(url, b"anything".to_vec());
        let mut s = session(transport);
        let got = s
            .fetch(&AddonSource::Url {
                url: url.to_string(),
            })
            .unwrap();
        assert_eq!(got.into_inner(), b"anything".to_vec());
        assert_eq!(s.into_transport().requests, vec![url.to_string()]);
    }

    #[test]
    fn direct_fetch_http_error() {
        let url = "https://mirror.test/gone.xpi";
        let transport = StaticTransport::new().with_status(url, 410);
        assert!(matches!(
            session(transport).fetch(&AddonSource::Url {
                url: url.to_string()
            }),
            Err(FetchError::DownloadFailed { .. })
        ));
    }

    #[test]
    fn resolve_does_not_download() {
        let transport = StaticTransport::new()
            .with_body(&format!("{}/1", BASE), catalog_for("sha256:00"));
        let mut s = session(transport);
        let opt = s.resolve(1).unwrap();
        assert_eq!(opt.download_url, PACKAGE_URL);
        assert_eq!(s.into_transport().requests.len(), 1);
    }

    #[test]
    fn fetch_stage_display() {
        assert_eq!(FetchStage::Verifying.to_string(), "verifying");
        assert_eq!(FetchStage::Rejected.to_string(), "rejected");
    }
}
