//! Parse an AMO API 1.5 `<addon>` document into install entries.

use super::{CatalogDescriptor, InstallEntry};
use crate::platform::CatalogPlatform;

/// Value of `status` that marks a pre-release install.
const BETA_STATUS: &str = "Beta";

/// Parses the catalog body. Returns a human-readable reason on failure.
///
/// Only direct `<install>` children of the root are considered. Entries are
/// kept in document order and are not validated here; the selected one is
/// checked when it is turned into an `InstallOption`.
pub(crate) fn parse_catalog(body: &[u8]) -> Result<CatalogDescriptor, String> {
    let text = std::str::from_utf8(body).map_err(|e| format!("body is not UTF-8: {}", e))?;
    // AMO documents may carry a DOCTYPE; it is allowed but not interpreted.
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options)
        .map_err(|e| format!("invalid XML: {}", e))?;

    let root = doc.root_element();
    if root.tag_name().name() != "addon" {
        return Err(format!(
            "expected root element <addon>, found <{}>",
            root.tag_name().name()
        ));
    }

    let child_text = |tag: &str| {
        root.children()
            .find(|n| n.has_tag_name(tag))
            .and_then(|n| n.text())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let installs = root
        .children()
        .filter(|n| n.has_tag_name("install"))
        .map(|n| InstallEntry {
            platform: CatalogPlatform::from_token(n.attribute("os").unwrap_or_default()),
            beta: n.attribute("status") == Some(BETA_STATUS),
            download_url: n
                .text()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            declared_digest: n.attribute("hash").map(str::to_string),
        })
        .collect();

    Ok(CatalogDescriptor {
        name: child_text("name"),
        guid: child_text("guid"),
        version: child_text("version"),
        installs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::OperatingSystem;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<addon id="607454">
  <name>uBlock Origin</name>
  <type id="1">Extension</type>
  <guid>uBlock0@raymondhill.net</guid>
  <slug>ublock-origin</slug>
  <version>1.58.0</version>
  <status id="4">Public</status>
  <install hash="sha256:1111" os="ALL" size="3900000">https://addons.example.org/files/ublock-1.58.0.xpi</install>
  <install hash="sha256:2222" os="Linux" status="Beta">https://addons.example.org/files/ublock-1.59b1.xpi</install>
</addon>"#;

    #[test]
    fn parses_metadata_and_installs_in_order() {
        let d = parse_catalog(SAMPLE.as_bytes()).unwrap();
        assert_eq!(d.name.as_deref(), Some("uBlock Origin"));
        assert_eq!(d.guid.as_deref(), Some("uBlock0@raymondhill.net"));
        assert_eq!(d.version.as_deref(), Some("1.58.0"));
        assert_eq!(d.installs.len(), 2);

        let first = &d.installs[0];
        assert_eq!(first.platform, CatalogPlatform::All);
        assert!(!first.beta);
        assert_eq!(
            first.download_url.as_deref(),
            Some("https://addons.example.org/files/ublock-1.58.0.xpi")
        );
        assert_eq!(first.declared_digest.as_deref(), Some("sha256:1111"));

        let second = &d.installs[1];
        assert_eq!(second.platform, CatalogPlatform::Os(OperatingSystem::Linux));
        assert!(second.beta);
    }

    #[test]
    fn accepts_doctype_declaration() {
        let xml = "<?xml version=\"1.0\"?>\n<!DOCTYPE addon>\n<addon><install os=\"ALL\" hash=\"sha256:aa\">https://f.test/a.xpi</install></addon>";
        let d = parse_catalog(xml.as_bytes()).unwrap();
        assert_eq!(d.installs.len(), 1);
        assert_eq!(d.installs[0].download_url.as_deref(), Some("https://f.test/a.xpi"));
    }

    #[test]
    fn entities_and_cdata_in_urls() {
        let xml = r#"<addon>
            <install os="ALL" hash="sha256:aa">https://f.test/a.xpi?src=api&amp;v=2</install>
            <install os="Linux" hash="sha256:bb"><![CDATA[https://f.test/b.xpi?x=1&y=2]]></install>
        </addon>"#;
        let d = parse_catalog(xml.as_bytes()).unwrap();
        assert_eq!(
            d.installs[0].download_url.as_deref(),
            Some("https://f.test/a.xpi?src=api&v=2")
        );
        assert_eq!(
            d.installs[1].download_url.as_deref(),
            Some("https://f.test/b.xpi?x=1&y=2")
        );
    }

    #[test]
    fn missing_attributes_are_kept_as_none() {
        let xml = r#"<addon><install>   </install></addon>"#;
        let d = parse_catalog(xml.as_bytes()).unwrap();
        assert_eq!(d.installs.len(), 1);
        assert_eq!(d.installs[0].platform, CatalogPlatform::Unrecognized(String::new()));
        assert!(d.installs[0].download_url.is_none());
        assert!(d.installs[0].declared_digest.is_none());
        assert!(d.name.is_none());
    }

    #[test]
    fn nested_install_elements_are_ignored() {
        let xml = r#"<addon><compatible_applications><install os="ALL" hash="sha256:00">https://x/y.xpi</install></compatible_applications></addon>"#;
        let d = parse_catalog(xml.as_bytes()).unwrap();
        assert!(d.installs.is_empty());
    }

    #[test]
    fn rejects_malformed_xml() {
        let err = parse_catalog(b"<addon><install os=\"ALL\">").unwrap_err();
        assert!(err.contains("invalid XML"), "{err}");
    }

    #[test]
    fn rejects_wrong_root() {
        let err = parse_catalog(b"<error>Add-on not found!</error>").unwrap_err();
        assert!(err.contains("<error>"), "{err}");
    }

    #[test]
    fn rejects_non_utf8() {
        assert!(parse_catalog(&[0xff, 0xfe, 0x00]).is_err());
    }
}
