/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use html_parser::{
    HTMLParseError, HTMLTagToken, HTMLToken, HTMLTokenizerInterface,
};

// --------- //
// Structure //
// --------- //

/// Un tokenizer minimal et déterministe, suffisant pour piloter
/// l'étape de construction de l'arbre dans les tests : balises avec
/// attributs, commentaires, DOCTYPE avec identifiants, texte, et
/// éléments de texte brut. Les références de caractères ne sont pas
/// décodées.
pub struct MiniTokenizer {
    input: Vec<char>,
    position: usize,
    raw_tag: Option<String>,
}

/// Les éléments dont le contenu est émis en texte brut jusqu'à la
/// balise de fin correspondante.
const RAW_TEXT_ELEMENTS: [&str; 10] = [
    "iframe", "noembed", "noframes", "noscript", "plaintext",
    "script", "style", "textarea", "title", "xmp",
];

// -------------- //
// Implémentation //
// -------------- //

impl MiniTokenizer {
    pub fn new(input: &str) -> Self {
        // Pré-traitement du flux : les fins de ligne sont
        // normalisées en U+000A.
        let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
        Self {
            input: normalized.chars().collect(),
            position: 0,
            raw_tag: None,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn starts_with_ci(&self, needle: &str) -> bool {
        needle.chars().enumerate().all(|(offset, expected)| {
            self.peek(offset).is_some_and(|ch| {
                ch.eq_ignore_ascii_case(&expected)
            })
        })
    }

    /// Vrai quand la position courante ouvre la balise de fin du
    /// contenu de texte brut en cours.
    fn at_raw_closing_tag(&self, raw_tag: &str) -> bool {
        if !self.starts_with_ci("</") {
            return false;
        }
        let mut offset = 2;
        for expected in raw_tag.chars() {
            match self.peek(offset) {
                | Some(ch) if ch.eq_ignore_ascii_case(&expected) => {
                    offset += 1;
                }
                | _ => return false,
            }
        }
        match self.peek(offset) {
            | None | Some('>') | Some('/') => true,
            | Some(ch) => ch.is_ascii_whitespace(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self
            .peek(0)
            .is_some_and(|ch| ch.is_ascii_whitespace())
        {
            self.position += 1;
        }
    }

    fn read_text(&mut self) -> HTMLToken {
        let start = self.position;
        // Un '<' initial qui n'ouvre pas une balise est du texte.
        self.position += 1;
        while let Some(ch) = self.peek(0) {
            if ch == '<' {
                break;
            }
            self.position += 1;
        }
        let text: String =
            self.input[start..self.position].iter().collect();
        HTMLToken::Text(text)
    }

    fn read_comment(&mut self) -> HTMLToken {
        self.position += 4; // "<!--"
        let start = self.position;
        while self.position < self.input.len()
            && !self.starts_with_ci("-->")
        {
            self.position += 1;
        }
        let comment: String =
            self.input[start..self.position].iter().collect();
        if self.starts_with_ci("-->") {
            self.position += 3;
        }
        HTMLToken::Comment(comment)
    }

    fn read_quoted_string(&mut self) -> Option<String> {
        let quote = self.peek(0)?;
        if quote != '"' && quote != '\'' {
            return None;
        }
        self.position += 1;
        let start = self.position;
        while self.peek(0).is_some_and(|ch| ch != quote && ch != '>')
        {
            self.position += 1;
        }
        let value: String =
            self.input[start..self.position].iter().collect();
        if self.peek(0) == Some(quote) {
            self.position += 1;
        }
        Some(value)
    }

    fn read_doctype(&mut self) -> HTMLToken {
        self.position += "<!doctype".len();
        self.skip_whitespace();

        let start = self.position;
        while self
            .peek(0)
            .is_some_and(|ch| !ch.is_ascii_whitespace() && ch != '>')
        {
            self.position += 1;
        }
        let name: String = self.input[start..self.position]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase();

        let mut token = HTMLToken::new_doctype();
        if !name.is_empty() {
            token = token.with_name(&name);
        }

        self.skip_whitespace();
        if self.starts_with_ci("public") {
            self.position += "public".len();
            self.skip_whitespace();
            if let Some(public_identifier) = self.read_quoted_string()
            {
                token =
                    token.with_public_identifier(public_identifier);
            }
            self.skip_whitespace();
            if let Some(system_identifier) = self.read_quoted_string()
            {
                token =
                    token.with_system_identifier(system_identifier);
            }
        } else if self.starts_with_ci("system") {
            self.position += "system".len();
            self.skip_whitespace();
            if let Some(system_identifier) = self.read_quoted_string()
            {
                token =
                    token.with_system_identifier(system_identifier);
            }
        }

        while self.peek(0).is_some_and(|ch| ch != '>') {
            self.position += 1;
        }
        if self.peek(0) == Some('>') {
            self.position += 1;
        }

        token
    }

    fn read_tag_name(&mut self) -> String {
        let start = self.position;
        while self.peek(0).is_some_and(|ch| {
            ch.is_ascii_alphanumeric() || ch == '-'
        }) {
            self.position += 1;
        }
        self.input[start..self.position]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase()
    }

    fn read_end_tag(&mut self) -> HTMLToken {
        self.position += 2; // "</"
        let name = self.read_tag_name();
        while self.peek(0).is_some_and(|ch| ch != '>') {
            self.position += 1;
        }
        if self.peek(0) == Some('>') {
            self.position += 1;
        }
        HTMLToken::Tag(HTMLTagToken::end().with_name(name))
    }

    fn read_start_tag(&mut self) -> HTMLToken {
        self.position += 1; // "<"
        let name = self.read_tag_name();

        let mut tag = HTMLTagToken::start().with_name(&name);
        let mut attributes: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek(0) {
                | None => break,
                | Some('>') => {
                    self.position += 1;
                    break;
                }
                | Some('/') if self.peek(1) == Some('>') => {
                    self.position += 2;
                    self_closing = true;
                    break;
                }
                | Some('/') => {
                    self.position += 1;
                }
                | _ => {
                    let start = self.position;
                    while self.peek(0).is_some_and(|ch| {
                        !ch.is_ascii_whitespace()
                            && ch != '='
                            && ch != '>'
                            && ch != '/'
                    }) {
                        self.position += 1;
                    }
                    let attr_name: String = self.input
                        [start..self.position]
                        .iter()
                        .collect::<String>()
                        .to_ascii_lowercase();

                    let mut attr_value = String::new();
                    if self.peek(0) == Some('=') {
                        self.position += 1;
                        if let Some(value) =
                            self.read_quoted_string()
                        {
                            attr_value = value;
                        } else {
                            let start = self.position;
                            while self.peek(0).is_some_and(|ch| {
                                !ch.is_ascii_whitespace() && ch != '>'
                            }) {
                                self.position += 1;
                            }
                            attr_value = self.input
                                [start..self.position]
                                .iter()
                                .collect();
                        }
                    }

                    // Les clés sont uniques en première occurrence.
                    if !attr_name.is_empty()
                        && !attributes
                            .iter()
                            .any(|(name, _)| *name == attr_name)
                    {
                        attributes.push((attr_name, attr_value));
                    }
                }
            }
        }

        tag = tag.with_attributes(attributes);
        if self_closing {
            tag = tag.with_self_closing_flag();
        }

        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.raw_tag = Some(name);
        }

        HTMLToken::Tag(tag)
    }

    fn read_raw_text(&mut self, raw_tag: &str) -> HTMLToken {
        let start = self.position;
        while self.position < self.input.len()
            && !self.at_raw_closing_tag(raw_tag)
        {
            self.position += 1;
        }
        let text: String =
            self.input[start..self.position].iter().collect();
        HTMLToken::Text(text)
    }
}

// -------------- //
// Implémentation // -> Interface
// -------------- //

impl HTMLTokenizerInterface for MiniTokenizer {
    fn consume_next_token(
        &mut self,
    ) -> Result<HTMLToken, HTMLParseError> {
        if self.position >= self.input.len() {
            return Ok(HTMLToken::EOF);
        }

        if let Some(raw_tag) = self.raw_tag.to_owned() {
            if !self.at_raw_closing_tag(&raw_tag) {
                return Ok(self.read_raw_text(&raw_tag));
            }
            self.raw_tag = None;
            return Ok(self.read_end_tag());
        }

        if self.peek(0) == Some('<') {
            if self.starts_with_ci("<!--") {
                return Ok(self.read_comment());
            }
            if self.starts_with_ci("<!doctype") {
                return Ok(self.read_doctype());
            }
            if self.peek(1) == Some('/')
                && self.peek(2).is_some_and(|ch| ch.is_ascii_alphabetic())
            {
                return Ok(self.read_end_tag());
            }
            if self.peek(1).is_some_and(|ch| ch.is_ascii_alphabetic())
            {
                return Ok(self.read_start_tag());
            }
        }

        Ok(self.read_text())
    }

    fn set_raw_tag(&mut self, tag_name: &str) {
        self.raw_tag = Some(tag_name.to_ascii_lowercase());
    }
}

// ---- //
// Test //
// ---- //

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(input: &str) -> Vec<HTMLToken> {
        let mut tokenizer = MiniTokenizer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.consume_next_token().unwrap();
            let eof = token.is_eof();
            tokens.push(token);
            if eof {
                break;
            }
        }
        tokens
    }

    #[test]
    fn test_tags_text_and_attributes() {
        let tokens =
            all_tokens("<p class=\"a\" id=b>x</p><hr/>");
        assert_eq!(tokens.len(), 5);

        let tag = tokens[0].as_tag();
        assert_eq!(tag.local_name(), "p");
        assert_eq!(tag.attribute("class"), Some("a"));
        assert_eq!(tag.attribute("id"), Some("b"));

        assert_eq!(tokens[1], HTMLToken::Text("x".to_owned()));
        assert!(tokens[2].is_end_tag());
        assert!(tokens[3].as_tag().is_self_closing());
        assert!(tokens[4].is_eof());
    }

    #[test]
    fn test_duplicate_attribute_keys_keep_first() {
        let tokens = all_tokens("<p id=a id=b>");
        let tag = tokens[0].as_tag();
        assert_eq!(tag.attribute("id"), Some("a"));
        assert_eq!(tag.attributes().len(), 1);
    }

    #[test]
    fn test_comment_and_doctype() {
        let tokens = all_tokens("<!-- c --><!DOCTYPE html>");
        assert_eq!(
            tokens[0],
            HTMLToken::Comment(" c ".to_owned())
        );
        assert!(matches!(
            &tokens[1],
            HTMLToken::DOCTYPE { name: Some(name), .. }
                if name == "html"
        ));
    }

    #[test]
    fn test_raw_text_element() {
        let tokens =
            all_tokens("<title>a <b> c</title><p>x");
        assert_eq!(tokens[0].as_tag().local_name(), "title");
        assert_eq!(
            tokens[1],
            HTMLToken::Text("a <b> c".to_owned())
        );
        assert!(tokens[2].is_end_tag());
        assert_eq!(tokens[3].as_tag().local_name(), "p");
    }
}
