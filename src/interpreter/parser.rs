use std::collections::HashMap;
use std::rc::Rc;
use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use crate::interpreter::ast::{BlockStatement, CaseStatement, Expression, FunctionLiteral, InfixOperator, PrefixOperator, Program, Statement};
use crate::interpreter::error::ParseError;
use crate::interpreter::lexer::{Lexer, Token, TokenType};


/// Binding power of an operator, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    LogicalAnd,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

lazy_static! {
    static ref PRECEDENCES: HashMap<TokenType, Precedence> = HashMap::from([
        (TokenType::DoubleAnd, Precedence::LogicalAnd),
        (TokenType::Equal, Precedence::Equals),
        (TokenType::NotEqual, Precedence::Equals),
        (TokenType::Less, Precedence::LessGreater),
        (TokenType::Greater, Precedence::LessGreater),
        (TokenType::Plus, Precedence::Sum),
        (TokenType::Minus, Precedence::Sum),
        (TokenType::Multiply, Precedence::Product),
        (TokenType::Divide, Precedence::Product),
        (TokenType::Percent, Precedence::Product),
        (TokenType::ParenthesisLeft, Precedence::Call),
        (TokenType::SquareBracketLeft, Precedence::Index),
    ]);
}

fn precedence_of(token_type: TokenType) -> Precedence {
    PRECEDENCES.get(&token_type).copied().unwrap_or(Precedence::Lowest)
}

type PrefixParseFn<'source> = fn(&mut Parser<'source>) -> Option<Expression>;
type InfixParseFn<'source> = fn(&mut Parser<'source>, Expression) -> Option<Expression>;

/// The best-effort program together with every syntax error found on the way.
/// The program must not be evaluated unless `errors` is empty.
#[derive(Debug)]
pub struct ParseOutput {
    pub program: Program,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }
}

/// Lexes and parses a complete program.
pub fn parse(source: &str) -> ParseOutput {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    ParseOutput { program, errors: parser.errors }
}

/// Pratt parser. `current` is the token being parsed, `peek` the one after it.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    current: Token, peek: Token,

    errors: Vec<ParseError>,

    prefix_parse_fns: FxHashMap<TokenType, PrefixParseFn<'source>>,
    infix_parse_fns: FxHashMap<TokenType, InfixParseFn<'source>>,
}

impl<'source> Parser<'source> {
    pub fn new(lexer: Lexer<'source>) -> Parser<'source> {
        let mut parser = Parser {
            lexer,
            current: Token::eof(), peek: Token::eof(),
            errors: Vec::new(),
            prefix_parse_fns: FxHashMap::default(),
            infix_parse_fns: FxHashMap::default(),
        };

        parser.register_prefix(TokenType::Identifier, Self::parse_identifier);
        parser.register_prefix(TokenType::Int, Self::parse_integer_literal);
        parser.register_prefix(TokenType::Hex, Self::parse_hex_literal);
        parser.register_prefix(TokenType::String, Self::parse_string_literal);
        parser.register_prefix(TokenType::True, Self::parse_boolean);
        parser.register_prefix(TokenType::False, Self::parse_boolean);
        parser.register_prefix(TokenType::Not, Self::parse_prefix_expression);
        parser.register_prefix(TokenType::Minus, Self::parse_prefix_expression);
        parser.register_prefix(TokenType::ParenthesisLeft, Self::parse_grouped_expression);
        parser.register_prefix(TokenType::If, Self::parse_if_expression);
        parser.register_prefix(TokenType::For, Self::parse_for_expression);
        parser.register_prefix(TokenType::Function, Self::parse_function_literal);
        parser.register_prefix(TokenType::SquareBracketLeft, Self::parse_array_literal);
        parser.register_prefix(TokenType::BracketLeft, Self::parse_hash_literal);

        for token_type in [
            TokenType::Plus, TokenType::Minus,
            TokenType::Multiply, TokenType::Divide, TokenType::Percent,
            TokenType::Equal, TokenType::NotEqual,
            TokenType::Less, TokenType::Greater,
            TokenType::DoubleAnd,
        ] {
            parser.register_infix(token_type, Self::parse_infix_expression);
        }

        parser.register_infix(TokenType::ParenthesisLeft, Self::parse_call_expression);
        parser.register_infix(TokenType::SquareBracketLeft, Self::parse_index_expression);

        parser.consume();
        parser.consume();
        parser
    }

    fn register_prefix(&mut self, token_type: TokenType, parse_fn: PrefixParseFn<'source>) {
        self.prefix_parse_fns.insert(token_type, parse_fn);
    }

    fn register_infix(&mut self, token_type: TokenType, parse_fn: InfixParseFn<'source>) {
        self.infix_parse_fns.insert(token_type, parse_fn);
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    // Statement parsing

    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.check(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }

            self.consume();
        }

        Program { statements }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.token_type() {
            TokenType::Let => self.parse_let_statement(),
            TokenType::Return => self.parse_return_statement(),
            TokenType::DoublePlus => self.parse_prefix_increment_statement(),
            TokenType::Switch => self.parse_switch_statement(),
            TokenType::Identifier if self.peek_is(TokenType::DoublePlus) => self.parse_postfix_increment_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        self.expect_peek(TokenType::Identifier)?;
        let name = self.current.source().to_owned();

        self.expect_peek(TokenType::Assign)?;
        self.consume();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Some(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.consume();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Some(Statement::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Some(Statement::Expression(expr))
    }

    fn parse_prefix_increment_statement(&mut self) -> Option<Statement> {
        self.expect_peek(TokenType::Identifier)?;
        let name = self.current.source().to_owned();
        self.skip_optional_semicolon();

        Some(Statement::DoublePlus { name })
    }

    fn parse_postfix_increment_statement(&mut self) -> Option<Statement> {
        let name = self.current.source().to_owned();
        self.consume(); // the '++'
        self.skip_optional_semicolon();

        Some(Statement::DoublePlus { name })
    }

    fn parse_switch_statement(&mut self) -> Option<Statement> {
        let subject = if self.peek_is(TokenType::BracketLeft) {
            None
        } else {
            self.consume();
            Some(self.parse_expression(Precedence::Lowest)?)
        };

        self.expect_peek(TokenType::BracketLeft)?;

        let mut cases = Vec::new();

        while !self.peek_is(TokenType::BracketRight) {
            self.expect_peek(TokenType::Case)?;
            cases.push(self.parse_case_statement()?);
        }

        self.consume(); // the '}'
        Some(Statement::Switch { subject, cases })
    }

    fn parse_case_statement(&mut self) -> Option<CaseStatement> {
        self.consume();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenType::Colon) {
            self.consume();
        }

        let mut statements = Vec::new();

        while !self.peek_is(TokenType::Break) {
            if self.peek_is(TokenType::Eof) || self.peek_is(TokenType::BracketRight) || self.peek_is(TokenType::Case) {
                self.peek_error(TokenType::Break);
                return None;
            }

            self.consume();

            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
        }

        self.consume(); // the 'break'
        self.skip_optional_semicolon();

        Some(CaseStatement { condition, body: BlockStatement { statements } })
    }

    fn parse_block_statement(&mut self) -> Option<BlockStatement> {
        self.consume(); // the '{'

        let mut statements = Vec::new();

        while !self.check(TokenType::BracketRight) {
            if self.check(TokenType::Eof) {
                self.error(ParseError::UnexpectedToken {
                    expected: TokenType::BracketRight,
                    got: TokenType::Eof,
                    pos: *self.current.start(),
                });
                return None;
            }

            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }

            self.consume();
        }

        Some(BlockStatement { statements })
    }

    // Expression parsing

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match self.prefix_parse_fns.get(&self.current.token_type()) {
            Some(prefix) => *prefix,
            None => {
                self.error(ParseError::NoPrefixParseFn {
                    token_type: self.current.token_type(),
                    pos: *self.current.start(),
                });
                return None;
            },
        };

        let mut left = prefix(self)?;

        while !self.peek_is(TokenType::Semicolon) && precedence < precedence_of(self.peek.token_type()) {
            let infix = match self.infix_parse_fns.get(&self.peek.token_type()) {
                Some(infix) => *infix,
                None => return Some(left),
            };

            self.consume();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.current.source().to_owned()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let parsed = self.current.source().parse::<i64>();
        self.integer_or_error(parsed.ok())
    }

    fn parse_hex_literal(&mut self) -> Option<Expression> {
        let digits = &self.current.source()[2..];
        let parsed = i64::from_str_radix(digits, 16);
        self.integer_or_error(parsed.ok())
    }

    fn integer_or_error(&mut self, value: Option<i64>) -> Option<Expression> {
        if value.is_none() {
            self.error(ParseError::InvalidInteger {
                literal: self.current.source().to_owned(),
                pos: *self.current.start(),
            });
        }

        value.map(Expression::Integer)
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::String(self.current.source().to_owned()))
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.check(TokenType::True)))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = if self.check(TokenType::Not) { PrefixOperator::Not } else { PrefixOperator::Negate };
        self.consume();

        let operand = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix { operator, operand: Box::new(operand) })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = match self.current.token_type() {
            TokenType::Plus => InfixOperator::Add,
            TokenType::Minus => InfixOperator::Subtract,
            TokenType::Multiply => InfixOperator::Multiply,
            TokenType::Divide => InfixOperator::Divide,
            TokenType::Percent => InfixOperator::Remainder,
            TokenType::Equal => InfixOperator::Equal,
            TokenType::NotEqual => InfixOperator::NotEqual,
            TokenType::Less => InfixOperator::Less,
            TokenType::Greater => InfixOperator::Greater,
            TokenType::DoubleAnd => InfixOperator::And,
            _ => return None,
        };

        let precedence = precedence_of(self.current.token_type());
        self.consume();

        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix { left: Box::new(left), operator, right: Box::new(right) })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.consume();

        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenType::ParenthesisRight)?;

        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        self.expect_peek(TokenType::ParenthesisLeft)?;
        self.consume();

        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenType::ParenthesisRight)?;
        self.expect_peek(TokenType::BracketLeft)?;

        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_is(TokenType::Else) {
            self.consume();
            self.expect_peek(TokenType::BracketLeft)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Some(Expression::If { condition: Box::new(condition), consequence, alternative })
    }

    fn parse_for_expression(&mut self) -> Option<Expression> {
        self.expect_peek(TokenType::ParenthesisLeft)?;
        self.consume();

        let init = self.parse_statement()?;

        if !self.check(TokenType::Semicolon) {
            self.expect_peek(TokenType::Semicolon)?;
        }

        self.consume();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenType::Semicolon)?;

        self.consume();
        let post = self.parse_statement()?;

        self.expect_peek(TokenType::ParenthesisRight)?;
        self.expect_peek(TokenType::BracketLeft)?;

        let body = self.parse_block_statement()?;

        Some(Expression::For {
            init: Box::new(init),
            condition: Box::new(condition),
            post: Box::new(post),
            body,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        self.expect_peek(TokenType::ParenthesisLeft)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenType::BracketLeft)?;
        let body = self.parse_block_statement()?;

        Some(Expression::Function(Rc::new(FunctionLiteral { parameters, body })))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenType::ParenthesisRight) {
            self.consume();
            return Some(parameters);
        }

        self.expect_peek(TokenType::Identifier)?;
        parameters.push(self.current.source().to_owned());

        while self.peek_is(TokenType::Comma) {
            self.consume();
            self.expect_peek(TokenType::Identifier)?;
            parameters.push(self.current.source().to_owned());
        }

        self.expect_peek(TokenType::ParenthesisRight)?;
        Some(parameters)
    }

    fn parse_call_expression(&mut self, callee: Expression) -> Option<Expression> {
        let arguments = self.parse_expression_list(TokenType::ParenthesisRight)?;
        Some(Expression::Call { callee: Box::new(callee), arguments })
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenType::SquareBracketRight)?;
        Some(Expression::Array(elements))
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_is(end) {
            self.consume();
            return Some(list);
        }

        self.consume();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenType::Comma) {
            self.consume();
            self.consume();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Some(list)
    }

    fn parse_index_expression(&mut self, collection: Expression) -> Option<Expression> {
        self.consume();

        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenType::SquareBracketRight)?;

        Some(Expression::Index { collection: Box::new(collection), index: Box::new(index) })
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let mut pairs = Vec::new();

        if self.peek_is(TokenType::BracketRight) {
            self.consume();
            return Some(Expression::Hash(pairs));
        }

        loop {
            self.consume();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenType::Colon)?;
            self.consume();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenType::Comma) {
                break;
            }

            self.consume();
        }

        self.expect_peek(TokenType::BracketRight)?;
        Some(Expression::Hash(pairs))
    }

    // Token handling

    fn consume(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    #[inline]
    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type() == token_type
    }

    #[inline]
    fn peek_is(&self, token_type: TokenType) -> bool {
        self.peek.token_type() == token_type
    }

    fn expect_peek(&mut self, token_type: TokenType) -> Option<()> {
        if self.peek_is(token_type) {
            self.consume();
            Some(())
        } else {
            self.peek_error(token_type);
            None
        }
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek_is(TokenType::Semicolon) {
            self.consume();
        }
    }

    // Error handling

    fn peek_error(&mut self, expected: TokenType) {
        self.error(ParseError::UnexpectedToken {
            expected,
            got: self.peek.token_type(),
            pos: *self.peek.start(),
        });
    }

    fn error(&mut self, error: ParseError) {
        tracing::debug!(pos = %error.pos(), "{}", error);
        self.errors.push(error);
    }
}
