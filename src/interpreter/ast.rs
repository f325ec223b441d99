use std::fmt::{Display, Formatter};
use std::rc::Rc;
use crate::util::join;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.statements.iter().try_for_each(|stmt| write!(f, "{}", stmt))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.statements.iter().try_for_each(|stmt| write!(f, "{}", stmt))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaseStatement {
    pub condition: Expression,
    pub body: BlockStatement,
}

impl Display for CaseStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "case {}: {}break;", self.condition, self.body)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Let {
        name: String,
        value: Expression,
    },
    Return(Expression),
    Expression(Expression),
    Block(BlockStatement),
    /// `x++` or `++x`
    DoublePlus {
        name: String,
    },
    Switch {
        subject: Option<Expression>,
        cases: Vec<CaseStatement>,
    },
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(expr) => write!(f, "{}", expr),
            Statement::Block(block) => write!(f, "{{ {} }}", block),
            Statement::DoublePlus { name } => write!(f, "{}++", name),
            Statement::Switch { subject, cases } => {
                f.write_str("switch ")?;

                if let Some(subject) = subject {
                    write!(f, "{} ", subject)?;
                }

                write!(f, "{{ {} }}", join(cases, " "))
            },
        }
    }
}

/// A function literal. Shared with every closure created from it, so it
/// outlives the program it was parsed from.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<String>,
    pub body: BlockStatement,
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn({}) {}", self.parameters.join(", "), self.body)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrefixOperator {
    Not,
    Negate,
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PrefixOperator::Not => "!",
            PrefixOperator::Negate => "-",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfixOperator {
    Add, Subtract,
    Multiply, Divide, Remainder,
    Equal, NotEqual,
    Less, Greater,
    And,
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Remainder => "%",
            InfixOperator::Equal => "==",
            InfixOperator::NotEqual => "!=",
            InfixOperator::Less => "<",
            InfixOperator::Greater => ">",
            InfixOperator::And => "&&",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Identifier(String),
    Integer(i64),
    String(String),
    Boolean(bool),

    Prefix {
        operator: PrefixOperator,
        operand: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    For {
        init: Box<Statement>,
        condition: Box<Expression>,
        post: Box<Statement>,
        body: BlockStatement,
    },
    Function(Rc<FunctionLiteral>),
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Array(Vec<Expression>),
    Index {
        collection: Box<Expression>,
        index: Box<Expression>,
    },
    Hash(Vec<(Expression, Expression)>),
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Identifier(name) => f.write_str(name),
            Expression::Integer(value) => write!(f, "{}", value),
            Expression::String(value) => f.write_str(value),
            Expression::Boolean(value) => write!(f, "{}", value),

            Expression::Prefix { operator, operand } => write!(f, "({}{})", operator, operand),
            Expression::Infix { left, operator, right } => write!(f, "({} {} {})", left, operator, right),
            Expression::If { condition, consequence, alternative } => {
                write!(f, "if {} {}", condition, consequence)?;

                if let Some(alternative) = alternative {
                    write!(f, "else {}", alternative)?;
                }

                Ok(())
            },
            Expression::For { init, condition, post, body } => {
                let init = init.to_string();
                write!(f, "for ({}; {}; {}) {}", init.trim_end_matches(';'), condition, post, body)
            },
            Expression::Function(function) => write!(f, "{}", function),
            Expression::Call { callee, arguments } => write!(f, "{}({})", callee, join(arguments, ", ")),
            Expression::Array(elements) => write!(f, "[{}]", join(elements, ", ")),
            Expression::Index { collection, index } => write!(f, "({}[{}])", collection, index),
            Expression::Hash(pairs) => write!(f, "{{{}}}", pairs.iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect::<Vec<String>>().join(", ")),
        }
    }
}
