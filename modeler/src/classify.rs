//! Classification of abstract message parts against a concrete
//! binding: each part of a message ends up body-bound, header-bound,
//! attachment-bound, or unbound.

use std::collections::HashMap;

use lather_wsdl::document::{
    BindingIo, Definitions, DescriptorKind, Message, SoapStyle,
};

use super::diag::Diagnostics;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartBinding {
    Body,
    Header,
    Attachment { mime_type: Option<String> },
    Unbound,
}

/// Classifies every part of `message` according to the binding
/// extensions in `io`. Returns `None` when the operation cannot be
/// modeled; diagnostics describe why.
pub(crate) fn classify(
    context: &str,
    message: &Message,
    io: &BindingIo,
    style: SoapStyle,
    definitions: &Definitions,
    extension: bool,
    diagnostics: &mut Diagnostics,
) -> Option<HashMap<String, PartBinding>> {
    let mut mime: HashMap<String, Option<String>> = HashMap::new();
    for content in &io.mime_contents {
        if message.part(&content.part).is_none() {
            let note = format!(
                "{}: mime:content names part `{}` which is not in message `{}`",
                context, content.part, message.name
            );
            if extension {
                diagnostics.warning(note);
                continue;
            }
            diagnostics.error(note);
            return None;
        }
        // alternative mime:content entries for the same part keep the
        // first declared type
        mime.entry(content.part.clone())
            .or_insert_with(|| content.mime_type.clone());
    }

    let mut header_claimed: Vec<String> = Vec::new();
    for header in &io.headers {
        if !header.is_literal() {
            let note = format!(
                "{}: soap:header for part `{}` uses encoded; only literal headers are supported",
                context, header.part
            );
            if extension {
                diagnostics.warning(note);
                continue;
            }
            diagnostics.error(note);
            return None;
        }

        let header_message = match definitions.message(&header.message) {
            Some(found) => found,
            None => {
                diagnostics.error(format!(
                    "{}: soap:header references undefined message `{}`",
                    context, header.message
                ));
                return None;
            }
        };

        let part = match header_message.part(&header.part) {
            Some(found) => found,
            None => {
                diagnostics.error(format!(
                    "{}: soap:header references part `{}` not present in message `{}`",
                    context, header.part, header.message
                ));
                return None;
            }
        };

        if part.kind != DescriptorKind::Element {
            let note = format!(
                "{}: header part `{}` is not element-described",
                context, header.part
            );
            if extension {
                diagnostics.warning(note);
                continue;
            }
            diagnostics.error(note);
            return None;
        }

        if header.message == message.name {
            header_claimed.push(header.part.clone());
        }
    }

    // Explicit body parts, when the attribute is present. An absent
    // attribute binds every part no other extension claimed.
    let explicit_body: Option<Vec<String>> = match io.body.as_ref().and_then(|b| b.parts.as_ref())
    {
        Some(tokens) => {
            let mut listed = Vec::new();
            for token in tokens.split_whitespace() {
                if message.part(token).is_none() {
                    diagnostics.error(format!(
                        "{}: soap:body parts attribute names unknown part `{}`",
                        context, token
                    ));
                    return None;
                }
                listed.push(token.to_owned());
            }
            Some(listed)
        }
        None => None,
    };

    let mut result = HashMap::new();
    for part in &message.parts {
        let in_mime = mime.contains_key(&part.name);
        let in_header = header_claimed.contains(&part.name);
        let in_body = match &explicit_body {
            Some(listed) => listed.contains(&part.name),
            None => !in_mime && !in_header,
        };

        let claims = usize::from(in_mime) + usize::from(in_header) + usize::from(in_body);
        if claims > 1 {
            let note = format!(
                "{}: part `{}` is bound by more than one extension",
                context, part.name
            );
            if extension {
                diagnostics.warning(note);
            } else {
                diagnostics.error(note);
                return None;
            }
        }

        let binding = if in_mime {
            PartBinding::Attachment {
                mime_type: mime.get(&part.name).cloned().flatten(),
            }
        } else if in_header {
            PartBinding::Header
        } else if in_body {
            PartBinding::Body
        } else {
            PartBinding::Unbound
        };
        result.insert(part.name.clone(), binding);
    }

    if style == SoapStyle::Document {
        let body_count = result
            .values()
            .filter(|binding| **binding == PartBinding::Body)
            .count();
        if body_count > 1 {
            let note = format!(
                "{}: document-style body binds {} parts of message `{}`; at most one is supported",
                context, body_count, message.name
            );
            if extension {
                diagnostics.warning(note);
            } else {
                diagnostics.error(note);
            }
            return None;
        }
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use lather_wsdl::document::{BindingIo, MimeContent, SoapBody, SoapStyle};
    use lather_wsdl::parse_str;

    use super::{classify, PartBinding};
    use crate::diag::Diagnostics;

    const DOCUMENT: &str = r#"
        <wsdl:definitions targetNamespace="urn:cls"
                xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                xmlns:tns="urn:cls">
            <wsdl:message name="request">
                <wsdl:part name="payload" type="xsd:string"/>
                <wsdl:part name="session" element="tns:session"/>
                <wsdl:part name="photo" type="xsd:base64Binary"/>
            </wsdl:message>
        </wsdl:definitions>
    "#;

    #[test]
    fn absent_parts_attribute_binds_unclaimed_parts_to_body() {
        let definitions = parse_str(DOCUMENT).unwrap();
        let message = &definitions.messages[0];
        let io = BindingIo {
            body: Some(SoapBody::default()),
            ..BindingIo::default()
        };
        let mut diagnostics = Diagnostics::new();

        let result = classify(
            "test",
            message,
            &io,
            SoapStyle::Rpc,
            &definitions,
            false,
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(result["payload"], PartBinding::Body);
        assert_eq!(result["session"], PartBinding::Body);
        assert_eq!(result["photo"], PartBinding::Body);
    }

    #[test]
    fn mime_content_claims_attachments() {
        let definitions = parse_str(DOCUMENT).unwrap();
        let message = &definitions.messages[0];
        let io = BindingIo {
            body: Some(SoapBody::default()),
            mime_contents: vec![MimeContent {
                part: "photo".to_owned(),
                mime_type: Some("image/jpeg".to_owned()),
            }],
            ..BindingIo::default()
        };
        let mut diagnostics = Diagnostics::new();

        let result = classify(
            "test",
            message,
            &io,
            SoapStyle::Rpc,
            &definitions,
            false,
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(
            result["photo"],
            PartBinding::Attachment {
                mime_type: Some("image/jpeg".to_owned())
            }
        );
        assert_eq!(result["payload"], PartBinding::Body);
    }

    #[test]
    fn explicit_parts_leave_the_rest_unbound() {
        let definitions = parse_str(DOCUMENT).unwrap();
        let message = &definitions.messages[0];
        let io = BindingIo {
            body: Some(SoapBody {
                parts: Some("payload".to_owned()),
                ..SoapBody::default()
            }),
            ..BindingIo::default()
        };
        let mut diagnostics = Diagnostics::new();

        let result = classify(
            "test",
            message,
            &io,
            SoapStyle::Rpc,
            &definitions,
            false,
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(result["payload"], PartBinding::Body);
        assert_eq!(result["session"], PartBinding::Unbound);
        assert_eq!(result["photo"], PartBinding::Unbound);
    }

    #[test]
    fn unknown_explicit_part_is_an_error() {
        let definitions = parse_str(DOCUMENT).unwrap();
        let message = &definitions.messages[0];
        let io = BindingIo {
            body: Some(SoapBody {
                parts: Some("nope".to_owned()),
                ..SoapBody::default()
            }),
            ..BindingIo::default()
        };
        let mut diagnostics = Diagnostics::new();

        let result = classify(
            "test",
            message,
            &io,
            SoapStyle::Rpc,
            &definitions,
            false,
            &mut diagnostics,
        );

        assert!(result.is_none());
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn document_style_rejects_multiple_body_parts() {
        let definitions = parse_str(DOCUMENT).unwrap();
        let message = &definitions.messages[0];
        let io = BindingIo {
            body: Some(SoapBody::default()),
            ..BindingIo::default()
        };
        let mut diagnostics = Diagnostics::new();

        let strict = classify(
            "test",
            message,
            &io,
            SoapStyle::Document,
            &definitions,
            false,
            &mut diagnostics,
        );
        assert!(strict.is_none());
        assert!(diagnostics.has_errors());

        // extension mode demotes it to a warning but still drops the
        // operation
        let mut diagnostics = Diagnostics::new();
        let lenient = classify(
            "test",
            message,
            &io,
            SoapStyle::Document,
            &definitions,
            true,
            &mut diagnostics,
        );
        assert!(lenient.is_none());
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.warning_count(), 1);
    }
}
