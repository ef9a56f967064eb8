//! XML post documents.
//!
//! # Format
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <post>
//!   <title>Hello</title>
//!   <slug>hello</slug>
//!   <pubDate>2024-01-15 08:30:00</pubDate>
//!   <lastModified>2024-01-15 08:30:00</lastModified>
//!   <excerpt>...</excerpt>
//!   <content>...</content>
//!   <ispublished>true</ispublished>
//!   <categories>
//!     <category>Rust</category>
//!   </categories>
//!   <tags>
//!     <tag>async</tag>
//!   </tags>
//!   <comments>
//!     <comment>
//!       <id>...</id>
//!       <author>...</author>
//!       <email>...</email>
//!       <date>2024-01-16 10:00:00</date>
//!       <content>...</content>
//!       <isAdmin>false</isAdmin>
//!     </comment>
//!   </comments>
//! </post>
//! ```
//!
//! Leaf text is written and read verbatim; only whitespace between elements
//! is insignificant. Dates are truncated to whole seconds.

use std::io::Cursor;
use std::mem;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::PostCodec;
use crate::data::{Comment, Post};
use crate::utils::date::{format_document_date, next_id, parse_document_date};

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Codec for `{id}.xml` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl PostCodec for XmlCodec {
    const EXTENSION: &'static str = "xml";

    fn encode(post: &Post) -> Result<Vec<u8>> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("post")))?;

        write_text_element(&mut writer, "title", &post.title)?;
        write_text_element(&mut writer, "slug", &post.slug)?;
        write_text_element(&mut writer, "pubDate", &format_document_date(&post.pub_date))?;
        write_text_element(
            &mut writer,
            "lastModified",
            &format_document_date(&post.last_modified),
        )?;
        write_text_element(&mut writer, "excerpt", &post.excerpt)?;
        write_text_element(&mut writer, "content", &post.content)?;
        write_text_element(&mut writer, "ispublished", bool_text(post.is_published))?;

        write_list(&mut writer, "categories", "category", &post.categories)?;
        write_list(&mut writer, "tags", "tag", &post.tags)?;

        writer.write_event(Event::Start(BytesStart::new("comments")))?;
        for comment in &post.comments {
            writer.write_event(Event::Start(BytesStart::new("comment")))?;
            write_text_element(&mut writer, "id", &comment.id)?;
            write_text_element(&mut writer, "author", &comment.author)?;
            write_text_element(&mut writer, "email", &comment.email)?;
            write_text_element(&mut writer, "date", &format_document_date(&comment.pub_date))?;
            write_text_element(&mut writer, "content", &comment.content)?;
            write_text_element(&mut writer, "isAdmin", bool_text(comment.is_admin))?;
            writer.write_event(Event::End(BytesEnd::new("comment")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("comments")))?;

        writer.write_event(Event::End(BytesEnd::new("post")))?;
        Ok(writer.into_inner().into_inner())
    }

    fn decode(bytes: &[u8]) -> Result<Post> {
        let mut reader = Reader::from_reader(bytes);
        reader.config_mut().trim_text(false);

        let mut doc = PostFields::default();
        let mut stack: Vec<String> = Vec::new();
        let mut text = String::new();
        let mut seen_root = false;

        loop {
            let event = reader
                .read_event()
                .with_context(|| format!("invalid XML at byte {}", reader.buffer_position()))?;

            match event {
                Event::Start(e) => {
                    let name = element_name(&e);
                    open_element(&mut doc, &stack, &name, &mut seen_root)?;
                    stack.push(name);
                    text.clear();
                }
                Event::Empty(e) => {
                    let name = element_name(&e);
                    open_element(&mut doc, &stack, &name, &mut seen_root)?;
                    close_element(&mut doc, &stack, &name, String::new())?;
                    text.clear();
                }
                Event::End(_) => {
                    let name = stack
                        .pop()
                        .ok_or_else(|| anyhow!("unbalanced closing tag"))?;
                    close_element(&mut doc, &stack, &name, mem::take(&mut text))?;
                }
                Event::Text(e) => {
                    let raw = e.decode()?;
                    text.push_str(&unescape(&raw)?);
                }
                Event::CData(e) => text.push_str(&e.decode()?),
                Event::GeneralRef(e) => {
                    if let Some(c) = e.resolve_char_ref()? {
                        text.push(c);
                    } else {
                        let name = e.decode()?;
                        let resolved = resolve_predefined_entity(&name)
                            .ok_or_else(|| anyhow!("unknown entity `&{name};`"))?;
                        text.push_str(resolved);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            bail!("unexpected end of document inside <{}>", stack.join("><"));
        }
        if !seen_root {
            bail!("missing <post> root element");
        }
        doc.into_post()
    }
}

// ============================================================================
// Writing
// ============================================================================

/// Write a text element: `<tag>text</tag>`.
///
/// The text event is written even when empty so the closing tag stays on the
/// same line and no indentation leaks into the value.
fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write `<outer><inner>a</inner><inner>b</inner></outer>`.
fn write_list(writer: &mut XmlWriter, outer: &str, inner: &str, values: &[String]) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(outer)))?;
    for value in values {
        write_text_element(writer, inner, value)?;
    }
    writer.write_event(Event::End(BytesEnd::new(outer)))?;
    Ok(())
}

const fn bool_text(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

// ============================================================================
// Reading
// ============================================================================

/// Fields collected while walking a document.
#[derive(Default)]
struct PostFields {
    title: Option<String>,
    slug: Option<String>,
    pub_date: Option<String>,
    last_modified: Option<String>,
    excerpt: Option<String>,
    content: Option<String>,
    is_published: Option<String>,
    categories: Vec<String>,
    tags: Vec<String>,
    comments: Vec<Comment>,
    /// Comment currently being read.
    comment: Option<CommentFields>,
}

#[derive(Default)]
struct CommentFields {
    id: Option<String>,
    author: Option<String>,
    email: Option<String>,
    date: Option<String>,
    content: Option<String>,
    is_admin: Option<String>,
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn open_element(
    doc: &mut PostFields,
    stack: &[String],
    name: &str,
    seen_root: &mut bool,
) -> Result<()> {
    match stack.last().map(String::as_str) {
        None if name == "post" && !*seen_root => *seen_root = true,
        None => bail!("unexpected root element <{name}>"),
        Some("comments") if name == "comment" => doc.comment = Some(CommentFields::default()),
        _ => {}
    }
    Ok(())
}

/// Assign the text of a closed element. Unknown elements are ignored.
fn close_element(doc: &mut PostFields, stack: &[String], name: &str, text: String) -> Result<()> {
    let parent = stack.last().map(String::as_str);
    match (parent, name) {
        (Some("post"), "title") => doc.title = Some(text),
        (Some("post"), "slug") => doc.slug = Some(text),
        (Some("post"), "pubDate") => doc.pub_date = Some(text),
        (Some("post"), "lastModified") => doc.last_modified = Some(text),
        (Some("post"), "excerpt") => doc.excerpt = Some(text),
        (Some("post"), "content") => doc.content = Some(text),
        (Some("post"), "ispublished") => doc.is_published = Some(text),
        (Some("categories"), "category") => doc.categories.push(text),
        (Some("tags"), "tag") => doc.tags.push(text),
        (Some("comments"), "comment") => {
            let fields = doc.comment.take().unwrap_or_default();
            let index = doc.comments.len();
            let comment = fields
                .into_comment()
                .with_context(|| format!("comment #{}", index + 1))?;
            doc.comments.push(comment);
        }
        (Some("comment"), field) => {
            if let Some(comment) = doc.comment.as_mut() {
                let slot = match field {
                    "id" => &mut comment.id,
                    "author" => &mut comment.author,
                    "email" => &mut comment.email,
                    "date" => &mut comment.date,
                    "content" => &mut comment.content,
                    "isAdmin" => &mut comment.is_admin,
                    _ => return Ok(()),
                };
                *slot = Some(text);
            }
        }
        _ => {}
    }
    Ok(())
}

impl PostFields {
    fn into_post(self) -> Result<Post> {
        let title = self.title.ok_or_else(|| anyhow!("missing <title>"))?;
        let pub_date = required_date(self.pub_date.as_deref(), "pubDate")?;
        let last_modified = match self.last_modified.as_deref() {
            Some(s) => date(s, "lastModified")?,
            None => pub_date,
        };
        let is_published = match self.is_published.as_deref() {
            Some(s) => parse_bool(s, "ispublished")?,
            None => true,
        };

        Ok(Post {
            id: String::new(),
            title,
            slug: self.slug.unwrap_or_default(),
            excerpt: self.excerpt.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            pub_date,
            last_modified,
            is_published,
            categories: self.categories,
            tags: self.tags,
            comments: self.comments,
        })
    }
}

impl CommentFields {
    fn into_comment(self) -> Result<Comment> {
        Ok(Comment {
            id: self.id.filter(|id| !id.is_empty()).unwrap_or_else(next_id),
            author: self.author.ok_or_else(|| anyhow!("missing <author>"))?,
            email: self.email.unwrap_or_default(),
            content: self.content.ok_or_else(|| anyhow!("missing <content>"))?,
            pub_date: required_date(self.date.as_deref(), "date")?,
            is_admin: match self.is_admin.as_deref() {
                Some(s) => parse_bool(s, "isAdmin")?,
                None => false,
            },
        })
    }
}

fn required_date(value: Option<&str>, field: &str) -> Result<DateTime<Utc>> {
    let value = value.ok_or_else(|| anyhow!("missing <{field}>"))?;
    date(value, field)
}

fn date(value: &str, field: &str) -> Result<DateTime<Utc>> {
    parse_document_date(value).ok_or_else(|| anyhow!("invalid <{field}> `{value}`"))
}

fn parse_bool(value: &str, field: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("invalid <{field}> `{value}`"),
    }
}
