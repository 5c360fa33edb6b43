//! Recursive-descent parser for the regex dialect, in the structural
//! style of `dandy/src/parser/regex.rs` (grammar: alternation over
//! sequences of postfixed atoms) but hand-rolled over the node arena
//! rather than building a `nom` tree, since grammar §4.4's node/threading
//! model needs direct control over node allocation. Mirrors
//! `examples/original_source/tools/regex.py`'s `RegExpParser` (`_regex`,
//! `_term`, `_factor`, `_base`).

use super::tree::{Kind, NodeId, Tree};
use super::RegexError;

struct Parser {
    chars: Vec<char>,
    pos: usize,
    tree: Tree,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// `regex ::= term ('|' regex)?`
    fn regex(&mut self) -> Result<Option<NodeId>, RegexError> {
        let term = self.term()?;
        if self.peek() == Some('|') {
            self.bump();
            let rest = self.regex()?;
            match (term, rest) {
                (Some(l), Some(r)) => Ok(Some(self.tree.push(Kind::Alt, Some(l), Some(r)))),
                _ => Err(RegexError::EmptyAlternative),
            }
        } else {
            Ok(term)
        }
    }

    /// `term ::= factor term?` (zero factors is only legal for the whole
    /// pattern, handled before the parser ever runs — see DESIGN.md Open
    /// Question #3).
    fn term(&mut self) -> Result<Option<NodeId>, RegexError> {
        let mut acc: Option<NodeId> = None;
        while matches!(self.peek(), Some(c) if c != '|' && c != ')') {
            let factor = self.factor()?;
            acc = Some(match acc {
                None => factor,
                Some(prev) => self.tree.push(Kind::Concat, Some(prev), Some(factor)),
            });
        }
        Ok(acc)
    }

    /// `factor ::= base ('*' | '?')*`
    fn factor(&mut self) -> Result<NodeId, RegexError> {
        let mut node = self.base()?;
        while matches!(self.peek(), Some('*') | Some('?')) {
            let c = self.bump().unwrap();
            let kind = if c == '*' { Kind::Star } else { Kind::Opt };
            node = self.tree.push(kind, Some(node), None);
        }
        Ok(node)
    }

    /// `base ::= terminal | '&' | '(' regex ')'`
    fn base(&mut self) -> Result<NodeId, RegexError> {
        match self.peek() {
            Some('(') => {
                self.bump();
                let inner = self.regex()?;
                if self.peek() != Some(')') {
                    return Err(RegexError::MismatchedParentheses);
                }
                self.bump();
                inner.ok_or(RegexError::EmptyGroup)
            }
            Some('&') => {
                self.bump();
                Ok(self.tree.push(Kind::Epsilon, None, None))
            }
            Some(c) if c.is_ascii_alphanumeric() => {
                self.bump();
                Ok(self.tree.push(Kind::Terminal(c), None, None))
            }
            Some(c) => Err(RegexError::UnexpectedChar(c, self.pos)),
            None => Err(RegexError::UnexpectedEnd),
        }
    }
}

/// Parses the regex dialect. Returns `(tree, None)` for the empty regex
/// (the whole input is blank after trimming), which compiles directly to
/// the one-state accepting-ε automaton without running the parser at all.
pub(crate) fn parse(input: &str) -> Result<(Tree, Option<NodeId>), RegexError> {
    // Literal `.` is concatenation sugar, stripped before parsing.
    let stripped = input.replace('.', "");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        return Ok((Tree::new(), None));
    }
    let mut parser = Parser {
        chars: trimmed.chars().collect(),
        pos: 0,
        tree: Tree::new(),
    };
    let root = parser.regex()?;
    if parser.pos != parser.chars.len() {
        return Err(RegexError::TrailingInput);
    }
    let root = root.ok_or(RegexError::EmptyGroup)?;
    parser.tree.thread(root);
    Ok((parser.tree, Some(root)))
}
