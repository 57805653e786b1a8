//! Recursive-descent parser for the pattern language.
//!
//! Grammar (see the crate docs for the surface syntax):
//!
//! ```text
//! pattern    := "MATCH"? nodeSpec (edgeSpec nodeSpec)* ("WHERE" orExpr)?
//! nodeSpec   := ident? (":" ident)? ("{" "label" "~" token "}")?
//! edgeSpec   := "-" "[" body "]" ("->" | "-")
//!             | "<-" "[" body "]" "-"
//!             | "->" | "<-" | "-" "-"
//! body       := ident? (":" ident ("|" ident)*)? ("*" int? (".." int?)?)?
//! orExpr     := andExpr ("OR" andExpr)*
//! andExpr    := notExpr ("AND" notExpr)*
//! notExpr    := "NOT"? primary
//! primary    := "(" orExpr ")" | comparison
//! ```
//!
//! Keywords are matched case-insensitively; identifiers, type names, and
//! literals are case-sensitive.

use smallvec::SmallVec;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::model::PropertyValue;
use crate::query::ast::{
    BoolExpr, CompareOp, Direction, EdgeSpec, Expr, NodeSpec, Pattern, Quantifier, Segment,
    StringOp,
};
use crate::query::token::{tokenize, Token, TokenKind};

const RESERVED: &[&str] = &[
    "match", "where", "and", "or", "not", "starts", "ends", "with", "contains", "type", "true",
    "false", "null",
];

impl Pattern {
    /// Parses a pattern string into its AST.
    ///
    /// # Errors
    ///
    /// [`GraphError::Parse`] with a byte position for malformed input,
    /// [`GraphError::QuantifierRange`] for inverted variable-length bounds,
    /// and [`GraphError::UnsupportedOperator`] for predicate operators
    /// outside the grammar.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tessera::query::Pattern;
    ///
    /// let pattern = Pattern::parse("u:User-[:MEMBER_OF]->g:Group")?;
    /// assert_eq!(pattern.segments.len(), 1);
    /// # Ok::<(), tessera::GraphError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Pattern> {
        let tokens = tokenize(text)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            end: text.len(),
        };
        let pattern = parser.pattern()?;
        debug!(
            segments = pattern.segments.len(),
            has_predicate = pattern.predicate.is_some(),
            "query.parse.complete"
        );
        Ok(pattern)
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn pattern(&mut self) -> Result<Pattern> {
        if self.peek_keyword("match") {
            self.advance();
        }
        let start = self.node_spec()?;
        let mut segments = Vec::new();
        while matches!(
            self.peek(),
            Some(TokenKind::Dash | TokenKind::ArrowLeft | TokenKind::ArrowRight)
        ) {
            let edge = self.edge_spec()?;
            let node = self.node_spec()?;
            segments.push(Segment { edge, node });
        }
        let predicate = if self.peek_keyword("where") {
            self.advance();
            Some(self.or_expr()?)
        } else {
            None
        };
        if let Some(token) = self.tokens.get(self.pos) {
            return Err(GraphError::parse(
                token.pos,
                format!("unexpected {}", token.kind.describe()),
            ));
        }
        Ok(Pattern {
            start,
            segments,
            predicate,
        })
    }

    fn node_spec(&mut self) -> Result<NodeSpec> {
        let mut spec = NodeSpec::default();
        if let Some(TokenKind::Ident(name)) = self.peek() {
            if !RESERVED.contains(&name.to_ascii_lowercase().as_str()) {
                spec.var = Some(name.clone());
                self.advance();
            }
        }
        if matches!(self.peek(), Some(TokenKind::Colon)) {
            self.advance();
            spec.type_filter = Some(self.expect_ident("node type after ':'")?);
        }
        if matches!(self.peek(), Some(TokenKind::LBrace)) {
            self.advance();
            let field = self.expect_ident("'label' inside '{...}'")?;
            if !field.eq_ignore_ascii_case("label") {
                return Err(GraphError::parse(
                    self.previous_pos(),
                    format!("unknown node filter '{field}', expected 'label'"),
                ));
            }
            self.expect(&TokenKind::Tilde, "'~' after 'label'")?;
            spec.label_substring = Some(self.label_token()?);
            self.expect(&TokenKind::RBrace, "'}' closing the label filter")?;
        }
        Ok(spec)
    }

    fn label_token(&mut self) -> Result<String> {
        match self.peek().cloned() {
            Some(TokenKind::Ident(text)) => {
                self.advance();
                Ok(text)
            }
            Some(TokenKind::Str(text)) => {
                self.advance();
                Ok(text)
            }
            _ => Err(self.unexpected("label substring after '~'")),
        }
    }

    fn edge_spec(&mut self) -> Result<EdgeSpec> {
        let mut spec = EdgeSpec {
            direction: Direction::Forward,
            var: None,
            types: SmallVec::new(),
            quantifier: None,
        };
        match self.peek() {
            Some(TokenKind::ArrowRight) => {
                self.advance();
            }
            Some(TokenKind::ArrowLeft) => {
                self.advance();
                spec.direction = Direction::Backward;
                if matches!(self.peek(), Some(TokenKind::LBracket)) {
                    self.advance();
                    self.edge_body(&mut spec)?;
                    self.expect(&TokenKind::RBracket, "']' closing the edge body")?;
                    self.expect(&TokenKind::Dash, "'-' after ']'")?;
                }
            }
            Some(TokenKind::Dash) => {
                self.advance();
                match self.peek() {
                    Some(TokenKind::LBracket) => {
                        self.advance();
                        self.edge_body(&mut spec)?;
                        self.expect(&TokenKind::RBracket, "']' closing the edge body")?;
                        match self.peek() {
                            Some(TokenKind::ArrowRight) => {
                                self.advance();
                            }
                            Some(TokenKind::Dash) => {
                                self.advance();
                                spec.direction = Direction::Any;
                            }
                            _ => return Err(self.unexpected("'->' or '-' after ']'")),
                        }
                    }
                    Some(TokenKind::Dash) => {
                        self.advance();
                        spec.direction = Direction::Any;
                    }
                    _ => return Err(self.unexpected("'[' or '-' after '-'")),
                }
            }
            _ => return Err(self.unexpected("an edge")),
        }
        Ok(spec)
    }

    fn edge_body(&mut self, spec: &mut EdgeSpec) -> Result<()> {
        if let Some(TokenKind::Ident(name)) = self.peek() {
            spec.var = Some(name.clone());
            self.advance();
        }
        if matches!(self.peek(), Some(TokenKind::Colon)) {
            self.advance();
            spec.types.push(self.expect_ident("edge type after ':'")?);
            while matches!(self.peek(), Some(TokenKind::Pipe)) {
                self.advance();
                spec.types.push(self.expect_ident("edge type after '|'")?);
            }
        }
        if matches!(self.peek(), Some(TokenKind::Star)) {
            self.advance();
            spec.quantifier = Some(self.quantifier()?);
        }
        Ok(())
    }

    fn quantifier(&mut self) -> Result<Quantifier> {
        let mut min = 1;
        let mut max = None;
        match self.peek().cloned() {
            Some(TokenKind::Int(value)) => {
                self.advance();
                min = self.bound(value)?;
                if matches!(self.peek(), Some(TokenKind::DotDot)) {
                    self.advance();
                    if let Some(TokenKind::Int(value)) = self.peek().cloned() {
                        self.advance();
                        max = Some(self.bound(value)?);
                    }
                } else {
                    max = Some(min);
                }
            }
            Some(TokenKind::DotDot) => {
                self.advance();
                if let Some(TokenKind::Int(value)) = self.peek().cloned() {
                    self.advance();
                    max = Some(self.bound(value)?);
                }
            }
            _ => {}
        }
        if let Some(max) = max {
            if min > max {
                return Err(GraphError::QuantifierRange { min, max });
            }
        }
        Ok(Quantifier { min, max })
    }

    fn bound(&mut self, value: i64) -> Result<usize> {
        usize::try_from(value)
            .map_err(|_| GraphError::parse(self.previous_pos(), "quantifier bound out of range"))
    }

    fn or_expr(&mut self) -> Result<BoolExpr> {
        let mut terms = vec![self.and_expr()?];
        while self.peek_keyword("or") {
            self.advance();
            terms.push(self.and_expr()?);
        }
        Ok(if terms.len() == 1 {
            terms.pop().expect("one term")
        } else {
            BoolExpr::Or(terms)
        })
    }

    fn and_expr(&mut self) -> Result<BoolExpr> {
        let mut terms = vec![self.not_expr()?];
        while self.peek_keyword("and") {
            self.advance();
            terms.push(self.not_expr()?);
        }
        Ok(if terms.len() == 1 {
            terms.pop().expect("one term")
        } else {
            BoolExpr::And(terms)
        })
    }

    fn not_expr(&mut self) -> Result<BoolExpr> {
        if self.peek_keyword("not") {
            self.advance();
            return Ok(BoolExpr::Not(Box::new(self.not_expr()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<BoolExpr> {
        if matches!(self.peek(), Some(TokenKind::LParen)) {
            self.advance();
            let inner = self.or_expr()?;
            self.expect(&TokenKind::RParen, "')' closing the group")?;
            return Ok(inner);
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<BoolExpr> {
        let lhs = self.expr()?;
        if let Some(op) = self.compare_op() {
            self.advance();
            let rhs = self.expr()?;
            return Ok(BoolExpr::Cmp { lhs, op, rhs });
        }
        if let Some(op) = self.string_op()? {
            let rhs = match self.peek().cloned() {
                Some(TokenKind::Str(text)) => {
                    self.advance();
                    text
                }
                _ => {
                    return Err(GraphError::parse(
                        self.current_pos(),
                        "string operator requires a double-quoted string on the right",
                    ));
                }
            };
            return Ok(BoolExpr::StringOp { lhs, op, rhs });
        }
        match self.tokens.get(self.pos) {
            Some(token) => Err(GraphError::UnsupportedOperator {
                token: token.kind.describe(),
            }),
            None => Err(self.unexpected("a comparison operator")),
        }
    }

    fn compare_op(&self) -> Option<CompareOp> {
        match self.peek()? {
            TokenKind::Eq => Some(CompareOp::Eq),
            TokenKind::Ne => Some(CompareOp::Ne),
            TokenKind::Lt => Some(CompareOp::Lt),
            TokenKind::Le => Some(CompareOp::Le),
            TokenKind::Gt => Some(CompareOp::Gt),
            TokenKind::Ge => Some(CompareOp::Ge),
            _ => None,
        }
    }

    fn string_op(&mut self) -> Result<Option<StringOp>> {
        if self.peek_keyword("contains") {
            self.advance();
            return Ok(Some(StringOp::Contains));
        }
        for (first, op) in [("starts", StringOp::StartsWith), ("ends", StringOp::EndsWith)] {
            if self.peek_keyword(first) {
                self.advance();
                if !self.peek_keyword("with") {
                    return Err(self.unexpected(&format!("'WITH' after '{}'", first.to_uppercase())));
                }
                self.advance();
                return Ok(Some(op));
            }
        }
        Ok(None)
    }

    fn expr(&mut self) -> Result<Expr> {
        match self.peek().cloned() {
            Some(TokenKind::Str(text)) => {
                self.advance();
                Ok(Expr::Literal(PropertyValue::String(text)))
            }
            Some(TokenKind::Int(value)) => {
                self.advance();
                Ok(Expr::Literal(PropertyValue::Int(value)))
            }
            Some(TokenKind::Float(value)) => {
                self.advance();
                Ok(Expr::Literal(PropertyValue::Float(value)))
            }
            Some(TokenKind::Dash) => {
                self.advance();
                match self.peek().cloned() {
                    Some(TokenKind::Int(value)) => {
                        self.advance();
                        Ok(Expr::Literal(PropertyValue::Int(-value)))
                    }
                    Some(TokenKind::Float(value)) => {
                        self.advance();
                        Ok(Expr::Literal(PropertyValue::Float(-value)))
                    }
                    _ => Err(self.unexpected("a number after '-'")),
                }
            }
            Some(TokenKind::Ident(name)) => {
                self.advance();
                if name.eq_ignore_ascii_case("true") {
                    return Ok(Expr::Literal(PropertyValue::Bool(true)));
                }
                if name.eq_ignore_ascii_case("false") {
                    return Ok(Expr::Literal(PropertyValue::Bool(false)));
                }
                if name.eq_ignore_ascii_case("null") {
                    return Ok(Expr::Literal(PropertyValue::Null));
                }
                if name.eq_ignore_ascii_case("type")
                    && matches!(self.peek(), Some(TokenKind::LParen))
                {
                    self.advance();
                    let var = self.expect_ident("edge variable inside type()")?;
                    self.expect(&TokenKind::RParen, "')' closing type()")?;
                    return Ok(Expr::EdgeType(var));
                }
                self.expect(&TokenKind::Dot, "'.' after variable")?;
                let key = self.expect_ident("property name after '.'")?;
                Ok(Expr::Property { var: name, key })
            }
            _ => Err(self.unexpected("a literal, 'var.property', or 'type(var)'")),
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|token| &token.kind)
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(TokenKind::Ident(name)) if name.eq_ignore_ascii_case(keyword))
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn current_pos(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |token| token.pos)
    }

    fn previous_pos(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.end, |token| token.pos)
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<()> {
        if self.peek() == Some(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String> {
        match self.peek().cloned() {
            Some(TokenKind::Ident(name)) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn unexpected(&self, what: &str) -> GraphError {
        match self.tokens.get(self.pos) {
            Some(token) => GraphError::parse(
                token.pos,
                format!("expected {what}, found {}", token.kind.describe()),
            ),
            None => GraphError::parse(self.end, format!("expected {what}, found end of pattern")),
        }
    }
}
