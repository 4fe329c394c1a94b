//! Stream link parser
//!
//! Reads the server list of a detail page. Each server entry carries its
//! player URL in an attribute and a display text hinting at the quality.

use scraper::Html;
use tracing::{debug, trace};

use crate::site::CompiledSite;
use crate::types::{Quality, StreamLink};

use super::element_text;

/// Parse every server entry on a detail page, in document order.
///
/// One link per entry: an entry without a link attribute still yields a
/// link with an empty `source_url`. Duplicates are kept.
pub fn parse_stream_links(html: &str, site: &CompiledSite) -> Vec<StreamLink> {
    let document = Html::parse_document(html);
    let adapter = site.adapter();
    let link_attr = adapter.selectors.server_link_attr.as_str();

    let links: Vec<StreamLink> = document
        .select(&site.selectors().server_item)
        .map(|server| {
            let source_url = match server.value().attr(link_attr).map(str::trim) {
                Some(source) if !source.is_empty() => adapter.resolve_url(source),
                _ => {
                    trace!(attr = link_attr, "server without link");
                    String::new()
                }
            };

            let label = element_text(&server);
            StreamLink {
                label: adapter.name.clone(),
                source_url,
                origin_url: adapter.base_url.clone(),
                quality: Quality::from_label(&label),
            }
        })
        .collect();

    debug!(count = links.len(), "parsed stream links");
    links
}
