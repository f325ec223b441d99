use std::collections::BTreeMap;
use std::rc::Rc;
use crate::interpreter::ast::{BlockStatement, CaseStatement, Expression, InfixOperator, PrefixOperator, Program, Statement};
use crate::interpreter::builtins::{BuiltinRegistry, BUILTINS};
use crate::interpreter::environment::{Env, Environment};
use crate::interpreter::error::RuntimeError;
use crate::interpreter::object::{Function, Value};

#[cfg(test)]
mod tests;

/// Why evaluation of a statement sequence stopped early.
#[derive(Debug)]
enum Unwind {
    Return(Value),
    Error(RuntimeError),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

type EvalResult = Result<Value, Unwind>;

/// Evaluates `program` in `env` with the standard builtins.
pub fn eval(program: &Program, env: &Env) -> Value {
    Evaluator::default().eval(program, env)
}

/// Tree-walking evaluator.
///
/// Recursion follows the nesting of the program and of its function calls;
/// unbounded recursion in the evaluated program overflows the host stack.
pub struct Evaluator<'builtins> {
    builtins: &'builtins BuiltinRegistry,
}

impl Default for Evaluator<'static> {
    fn default() -> Self {
        Evaluator::new(&*BUILTINS)
    }
}

impl<'builtins> Evaluator<'builtins> {
    pub fn new(builtins: &'builtins BuiltinRegistry) -> Evaluator<'builtins> {
        Evaluator { builtins }
    }

    /// Evaluates every top-level statement. Bindings made by `let` stay in
    /// `env`, so the same environment can be passed again for the next input.
    pub fn eval(&self, program: &Program, env: &Env) -> Value {
        match self.eval_statements(&program.statements, env) {
            Ok(value) | Err(Unwind::Return(value)) => value,
            Err(Unwind::Error(error)) => {
                tracing::debug!(%error, "evaluation failed");
                Value::Error(error.to_string())
            },
        }
    }

    // Statements

    fn eval_statements(&self, statements: &[Statement], env: &Env) -> EvalResult {
        let mut result = Value::Null;

        for stmt in statements {
            result = self.eval_statement(stmt, env)?;
        }

        Ok(result)
    }

    fn eval_block(&self, block: &BlockStatement, env: &Env) -> EvalResult {
        self.eval_statements(&block.statements, env)
    }

    fn eval_statement(&self, stmt: &Statement, env: &Env) -> EvalResult {
        match stmt {
            Statement::Let { name, value } => {
                let value = self.eval_expression(value, env)?;
                env.borrow_mut().set(name, value);
                Ok(Value::Null)
            },
            Statement::Return(value) => Err(Unwind::Return(self.eval_expression(value, env)?)),
            Statement::Expression(expr) => self.eval_expression(expr, env),
            Statement::Block(block) => self.eval_block(block, env),
            Statement::DoublePlus { name } => self.eval_increment(name, env),
            Statement::Switch { subject, cases } => self.eval_switch(subject.as_ref(), cases, env),
        }
    }

    fn eval_increment(&self, name: &str, env: &Env) -> EvalResult {
        let current = env.borrow().get(name)
            .ok_or_else(|| RuntimeError::IdentifierNotFound(name.to_owned()))?;

        let incremented = match current {
            Value::Integer(value) => Value::Integer(value.wrapping_add(1)),
            other => return Err(RuntimeError::IncrementNotSupported(other.type_name()).into()),
        };

        env.borrow_mut().assign(name, incremented.clone());
        Ok(incremented)
    }

    fn eval_switch(&self, subject: Option<&Expression>, cases: &[CaseStatement], env: &Env) -> EvalResult {
        let subject = match subject {
            Some(subject) => Some(self.eval_expression(subject, env)?),
            None => None,
        };

        for case in cases {
            let condition = self.eval_expression(&case.condition, env)?;

            let matched = match &subject {
                Some(subject) => *subject == condition,
                None => condition.is_truthy(),
            };

            if matched {
                return self.eval_block(&case.body, env);
            }
        }

        Ok(Value::Null)
    }

    // Expressions

    fn eval_expression(&self, expr: &Expression, env: &Env) -> EvalResult {
        match expr {
            Expression::Identifier(name) => self.eval_identifier(name, env),
            Expression::Integer(value) => Ok(Value::Integer(*value)),
            Expression::String(value) => Ok(Value::String(value.as_str().into())),
            Expression::Boolean(value) => Ok(Value::Boolean(*value)),

            Expression::Prefix { operator, operand } => {
                let operand = self.eval_expression(operand, env)?;
                Ok(eval_prefix(*operator, operand)?)
            },
            Expression::Infix { left, operator: InfixOperator::And, right } => {
                if !self.eval_expression(left, env)?.is_truthy() {
                    return Ok(Value::Boolean(false));
                }

                Ok(Value::Boolean(self.eval_expression(right, env)?.is_truthy()))
            },
            Expression::Infix { left, operator, right } => {
                let left = self.eval_expression(left, env)?;
                let right = self.eval_expression(right, env)?;
                Ok(eval_infix(*operator, left, right)?)
            },
            Expression::If { condition, consequence, alternative } => {
                if self.eval_expression(condition, env)?.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    Ok(Value::Null)
                }
            },
            Expression::For { init, condition, post, body } => {
                let loop_env = Environment::new_enclosed(env);
                self.eval_statement(init, &loop_env)?;

                while self.eval_expression(condition, &loop_env)?.is_truthy() {
                    self.eval_block(body, &loop_env)?;
                    self.eval_statement(post, &loop_env)?;
                }

                Ok(Value::Null)
            },
            Expression::Function(literal) => Ok(Value::Function(Rc::new(Function {
                literal: Rc::clone(literal),
                env: Rc::clone(env),
            }))),
            Expression::Call { callee, arguments } => {
                let callee = self.eval_expression(callee, env)?;
                let arguments = self.eval_expressions(arguments, env)?;
                self.apply_function(callee, arguments)
            },
            Expression::Array(elements) => Ok(Value::array(self.eval_expressions(elements, env)?)),
            Expression::Index { collection, index } => {
                let collection = self.eval_expression(collection, env)?;
                let index = self.eval_expression(index, env)?;
                Ok(eval_index(collection, index)?)
            },
            Expression::Hash(pairs) => {
                let mut hash = BTreeMap::new();

                for (key, value) in pairs {
                    let key = self.eval_expression(key, env)?;
                    let hash_key = key.hash_key()
                        .ok_or_else(|| RuntimeError::UnusableAsHashKey(key.type_name()))?;

                    let value = self.eval_expression(value, env)?;
                    hash.insert(hash_key, value);
                }

                Ok(Value::Hash(Rc::new(hash)))
            },
        }
    }

    fn eval_expressions(&self, exprs: &[Expression], env: &Env) -> Result<Vec<Value>, Unwind> {
        exprs.iter().map(|expr| self.eval_expression(expr, env)).collect()
    }

    fn eval_identifier(&self, name: &str, env: &Env) -> EvalResult {
        if let Some(value) = env.borrow().get(name) {
            return Ok(value);
        }

        match self.builtins.get(name) {
            Some(builtin) => Ok(Value::Builtin(*builtin)),
            None => Err(RuntimeError::IdentifierNotFound(name.to_owned()).into()),
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(callee = callee.type_name(), args = arguments.len()))]
    fn apply_function(&self, callee: Value, arguments: Vec<Value>) -> EvalResult {
        match callee {
            Value::Function(function) => {
                let parameters = &function.literal.parameters;

                if parameters.len() != arguments.len() {
                    return Err(RuntimeError::WrongArgumentCount { got: arguments.len(), want: parameters.len() }.into());
                }

                let call_env = Environment::new_enclosed(&function.env);

                {
                    let mut scope = call_env.borrow_mut();

                    for (parameter, argument) in parameters.iter().zip(arguments) {
                        scope.set(parameter, argument);
                    }
                }

                match self.eval_block(&function.literal.body, &call_env) {
                    Ok(value) | Err(Unwind::Return(value)) => Ok(value),
                    Err(error) => Err(error),
                }
            },
            Value::Builtin(builtin) => {
                tracing::trace!(builtin = builtin.name, "calling builtin");
                Ok((builtin.func)(&arguments)?)
            },
            other => Err(RuntimeError::NotAFunction(other.type_name()).into()),
        }
    }
}

fn eval_prefix(operator: PrefixOperator, operand: Value) -> Result<Value, RuntimeError> {
    match (operator, operand) {
        (PrefixOperator::Not, operand) => Ok(Value::Boolean(!operand.is_truthy())),
        (PrefixOperator::Negate, Value::Integer(value)) => Ok(Value::Integer(value.wrapping_neg())),
        (PrefixOperator::Negate, operand) => Err(RuntimeError::UnknownPrefixOperator { operator, operand: operand.type_name() }),
    }
}

fn eval_infix(operator: InfixOperator, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Integer(left), Value::Integer(right)) => eval_integer_infix(operator, *left, *right),
        (Value::String(left_value), Value::String(right_value)) => match operator {
            InfixOperator::Add => Ok(Value::String(format!("{}{}", left_value, right_value).into())),
            InfixOperator::Equal => Ok(Value::Boolean(left_value == right_value)),
            InfixOperator::NotEqual => Ok(Value::Boolean(left_value != right_value)),
            _ => Err(unknown_infix(operator, &left, &right)),
        },
        (Value::Boolean(_), Value::Boolean(_)) | (Value::Null, Value::Null) => match operator {
            InfixOperator::Equal => Ok(Value::Boolean(left == right)),
            InfixOperator::NotEqual => Ok(Value::Boolean(left != right)),
            _ => Err(unknown_infix(operator, &left, &right)),
        },
        _ if left.type_name() != right.type_name() => Err(RuntimeError::TypeMismatch {
            left: left.type_name(),
            operator,
            right: right.type_name(),
        }),
        _ => Err(unknown_infix(operator, &left, &right)),
    }
}

fn eval_integer_infix(operator: InfixOperator, left: i64, right: i64) -> Result<Value, RuntimeError> {
    Ok(match operator {
        InfixOperator::Add => Value::Integer(left.wrapping_add(right)),
        InfixOperator::Subtract => Value::Integer(left.wrapping_sub(right)),
        InfixOperator::Multiply => Value::Integer(left.wrapping_mul(right)),
        InfixOperator::Divide if right == 0 => return Err(RuntimeError::DivisionByZero),
        InfixOperator::Divide => Value::Integer(left.wrapping_div(right)),
        InfixOperator::Remainder if right == 0 => return Err(RuntimeError::DivisionByZero),
        InfixOperator::Remainder => Value::Integer(left.wrapping_rem(right)),
        InfixOperator::Equal => Value::Boolean(left == right),
        InfixOperator::NotEqual => Value::Boolean(left != right),
        InfixOperator::Less => Value::Boolean(left < right),
        InfixOperator::Greater => Value::Boolean(left > right),
        InfixOperator::And => return Err(RuntimeError::UnknownInfixOperator {
            left: "INTEGER",
            operator,
            right: "INTEGER",
        }),
    })
}

fn unknown_infix(operator: InfixOperator, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::UnknownInfixOperator { left: left.type_name(), operator, right: right.type_name() }
}

fn eval_index(collection: Value, index: Value) -> Result<Value, RuntimeError> {
    match (&collection, &index) {
        (Value::Array(elements), Value::Integer(position)) => Ok(usize::try_from(*position).ok()
            .and_then(|position| elements.get(position))
            .cloned()
            .unwrap_or(Value::Null)),
        (Value::Hash(pairs), _) => {
            let key = index.hash_key()
                .ok_or_else(|| RuntimeError::UnusableAsHashKey(index.type_name()))?;

            Ok(pairs.get(&key).cloned().unwrap_or(Value::Null))
        },
        _ => Err(RuntimeError::IndexNotSupported(collection.type_name())),
    }
}
