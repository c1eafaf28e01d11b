//! HTML `<head>` fragments and the sitemap.
//!
//! The host owns the page body; this module only turns a
//! [`PageDescriptor`] into the tags that go inside `<head>`, using
//! [maud](https://maud.lambda.xyz/) so every attribute is escaped.
//!
//! JSON-LD is inserted pre-escaped with `</` rewritten to `<\/`, which keeps
//! the script element from being closed by content.

use crate::context::SeoContext;
use crate::metadata;
use crate::page::PageDescriptor;
use crate::routes::Route;
use maud::{Markup, PreEscaped, html};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use serde_json::Value;

/// JSON text safe to embed inside `<script>`.
pub fn json_ld(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

/// Every `<head>` tag for one page.
pub fn head(page: &PageDescriptor) -> Markup {
    let m = &page.metadata;
    let og = &m.open_graph;
    let tw = &m.twitter;

    html! {
        title { (m.title) }
        meta name="description" content=(m.description);
        @if !m.keywords.is_empty() {
            meta name="keywords" content=(m.keywords.join(", "));
        }
        link rel="canonical" href=(m.canonical_url);
        @for (hreflang, url) in &m.alternate_urls {
            link rel="alternate" hreflang=(hreflang) href=(url);
        }

        meta property="og:type" content=(og.kind);
        meta property="og:title" content=(og.title);
        meta property="og:description" content=(og.description);
        meta property="og:url" content=(og.url);
        meta property="og:site_name" content=(og.site_name);
        meta property="og:locale" content=(og.locale);
        @for alternate in &og.alternate_locale {
            meta property="og:locale:alternate" content=(alternate);
        }
        @for image in &og.images {
            meta property="og:image" content=(image.url);
            meta property="og:image:width" content=(image.width);
            meta property="og:image:height" content=(image.height);
            meta property="og:image:alt" content=(image.alt);
        }

        meta name="twitter:card" content=(tw.card);
        meta name="twitter:title" content=(tw.title);
        meta name="twitter:description" content=(tw.description);
        @if let Some(site) = &tw.site {
            meta name="twitter:site" content=(site);
        }
        @for image in &tw.images {
            meta name="twitter:image" content=(image);
        }

        @for block in &page.structured_data {
            script type="application/ld+json" { (PreEscaped(json_ld(block))) }
        }
    }
}

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// `sitemap.xml` listing every route with its hreflang alternates.
pub fn sitemap(ctx: &SeoContext, routes: &[Route]) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS), ("xmlns:xhtml", XHTML_NS)]),
    ))?;

    for route in routes {
        let path = route.path();
        let loc = ctx.url(&path, route.locale());
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer.write_event(Event::Start(BytesStart::new("loc")))?;
        writer.write_event(Event::Text(BytesText::new(&loc)))?;
        writer.write_event(Event::End(BytesEnd::new("loc")))?;
        for (hreflang, url) in metadata::alternate_urls(ctx, &path) {
            writer.write_event(Event::Empty(BytesStart::new("xhtml:link").with_attributes([
                ("rel", "alternate"),
                ("hreflang", hreflang.as_str()),
                ("href", url.as_str()),
            ])))?;
        }
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;
    let mut xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    xml.push('\n');
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::resolve_path;
    use crate::test_helpers::ctx;
    use crate::locale::Locale;
    use serde_json::json;

    #[test]
    fn json_ld_escapes_script_close() {
        let value = json!({"text": "a </script><script>alert(1)"});
        let out = json_ld(&value);
        assert!(!out.contains("</script>"));
        assert!(out.contains("<\\/script>"));
    }

    #[test]
    fn head_carries_canonical_and_alternates() {
        let page = resolve_path(&ctx(), "/es/glossary/proration").unwrap();
        let html = head(&page).into_string();
        assert!(html.contains(r#"<link rel="canonical" href="https://ai.rio.br/es/glossary/proration">"#));
        assert!(html.contains(r#"hreflang="x-default" href="https://ai.rio.br/glossary/proration""#));
        assert!(html.contains(r#"hreflang="pt" href="https://ai.rio.br/pt/glossary/proration""#));
        assert!(html.contains(r#"<meta property="og:locale" content="es_ES">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
    }

    #[test]
    fn head_embeds_each_json_ld_block() {
        let page = resolve_path(&ctx(), "/compare/lago").unwrap();
        let html = head(&page).into_string();
        assert_eq!(html.matches(r#"<script type="application/ld+json">"#).count(), 3);
        assert!(html.contains(r#""@type":"Article""#));
        assert!(html.contains(r#""@type":"FAQPage""#));
    }

    #[test]
    fn head_escapes_text() {
        let page = resolve_path(&ctx(), "/compare/build-in-house").unwrap();
        let html = head(&page).into_string();
        assert!(html.contains("<title>Ai.Rio vs Build In-House: Comparison &amp; Review</title>"));
    }

    #[test]
    fn sitemap_lists_routes_with_alternates() {
        let ctx = ctx();
        let routes = vec![
            Route::Glossary {
                locale: Locale::En,
                slug: "mrr".into(),
            },
            Route::Glossary {
                locale: Locale::Pt,
                slug: "mrr".into(),
            },
        ];
        let xml = sitemap(&ctx, &routes).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.contains("<loc>https://ai.rio.br/glossary/mrr</loc>"));
        assert!(xml.contains("<loc>https://ai.rio.br/pt/glossary/mrr</loc>"));
        assert_eq!(xml.matches(r#"hreflang="x-default""#).count(), 2);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn sitemap_escapes_urls() {
        let mut ctx = ctx();
        ctx.config.site.origin = "https://ai.rio.br/?a=1&b=2".into();
        let routes = vec![Route::Glossary {
            locale: Locale::En,
            slug: "mrr".into(),
        }];
        let xml = sitemap(&ctx, &routes).unwrap();
        assert!(xml.contains("a=1&amp;b=2"));
        assert!(!xml.contains("a=1&b=2"));
    }
}
