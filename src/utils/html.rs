use ammonia::Builder;

/// Sanitize embed markup submitted for slide content.
///
/// Whitelist-based strategy on top of ammonia's defaults: an <iframe> with a
/// restricted attribute set is allowed through (slide embeds are iframes),
/// while scripts, event handlers and non-http(s) URLs are stripped.
///
/// Note:
/// 1. This runs before the markup is stored, so a poisoned submission never
///    reaches the detail page.
/// 2. Text fields (guides, descriptions) are rendered as plain text and do
///    not pass through here.
pub fn clean_embed_markup(input: &str) -> String {
    Builder::default()
        .add_tags(["iframe"])
        .add_tag_attributes(
            "iframe",
            ["src", "width", "height", "frameborder", "allowfullscreen", "title"],
        )
        .clean(input)
        .to_string()
}
