//! RSS 2.0 item extraction.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::{types::FeedEntry, Error};

#[derive(Clone, Copy, PartialEq)]
enum Field {
    Title,
    Link,
    PubDate,
}

/// Parses an RSS document and returns its `<item>` entries in feed order.
///
/// Only `title`, `link` and `pubDate` are read; every other element is
/// skipped. Entries without a title are kept here and left to the caller.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>, Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut current: Option<FeedEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => {
                    current = Some(FeedEntry::default());
                    field = None;
                }
                b"title" if current.is_some() => field = Some(Field::Title),
                b"link" if current.is_some() => field = Some(Field::Link),
                b"pubDate" if current.is_some() => field = Some(Field::PubDate),
                _ => field = None,
            },
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(entry) = current.take() {
                        entries.push(entry);
                    }
                }
                field = None;
            }
            Ok(Event::Text(e)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = e
                        .unescape()
                        .map_err(|err| Error::InvalidFeed(err.to_string()))?;
                    push_field(entry, f, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = String::from_utf8_lossy(e.as_ref());
                    push_field(entry, f, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::InvalidFeed(format!(
                    "error at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    tracing::debug!("Parsed {} feed entries", entries.len());
    Ok(entries)
}

fn push_field(entry: &mut FeedEntry, field: Field, text: &str) {
    let target = match field {
        Field::Title => &mut entry.title,
        Field::Link => &mut entry.link,
        Field::PubDate => &mut entry.published,
    };
    target.push_str(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_in_order() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
  <title>"日高屋" - Google ニュース</title>
  <item>
    <title>日高屋、来月から一部メニュー値上げ - 日経</title>
    <link>https://news.example.com/a</link>
    <pubDate>Tue, 07 Oct 2025 03:00:00 GMT</pubDate>
    <source url="https://www.nikkei.com">日経</source>
  </item>
  <item>
    <title><![CDATA[ハイデイ日高(7611)決算発表]]></title>
    <link>https://news.example.com/b</link>
    <pubDate>Wed, 08 Oct 2025 06:30:00 GMT</pubDate>
  </item>
</channel></rss>"#;
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "日高屋、来月から一部メニュー値上げ - 日経");
        assert_eq!(entries[0].link, "https://news.example.com/a");
        assert_eq!(entries[0].published, "Tue, 07 Oct 2025 03:00:00 GMT");
        assert_eq!(entries[1].title, "ハイデイ日高(7611)決算発表");
    }

    #[test]
    fn channel_title_is_not_an_entry() {
        let xml = "<rss><channel><title>feed</title></channel></rss>";
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn entities_are_unescaped() {
        let xml = "<rss><channel><item><title>A &amp; B</title></item></channel></rss>";
        let entries = parse_feed(xml).unwrap();
        assert_eq!(entries[0].title, "A & B");
        assert_eq!(entries[0].link, "");
    }

    #[test]
    fn mismatched_tags_are_an_error() {
        let xml = "<rss><channel><item><title>x</link></item></channel></rss>";
        assert!(matches!(parse_feed(xml), Err(Error::InvalidFeed(_))));
    }
}
