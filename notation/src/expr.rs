//! Owned expression trees, walked with explicit stacks instead of recursion.

use std::convert::Infallible;
use std::fmt::{self, Display};

use crate::error::{ConvertError, EvalError, Malformed, Result};
use crate::token::{tokenize, Operator, Token};

/// A binary expression over single character operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Operand(char),
    Binary(Operator, Box<Expr>, Box<Expr>),
}

/// One node of an [`Expr`] with its operands replaced by `A`: what a fold sees
/// once both operands are done, or what an unfold returns for one seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprFrame<A> {
    Operand(char),
    Binary(Operator, A, A),
}

/// Pending work while folding a borrowed tree in post-order.
enum Visit<'a> {
    Node(&'a Expr),
    Apply(Operator),
}

/// Pending work while growing a tree from seeds.
enum Grow<S> {
    Seed(S),
    Join(Operator),
}

impl Expr {
    pub fn operand(c: char) -> Expr {
        Expr::Operand(c)
    }

    pub fn binary(op: Operator, left: Expr, right: Expr) -> Expr {
        Expr::Binary(op, Box::new(left), Box::new(right))
    }

    /// Fold the tree bottom-up, left operand before right, stopping at the first error.
    pub fn try_fold<Out, E>(
        &self,
        mut f: impl FnMut(ExprFrame<Out>) -> std::result::Result<Out, E>,
    ) -> std::result::Result<Out, E> {
        let mut todo = vec![Visit::Node(self)];
        let mut folded: Vec<Out> = Vec::new();

        while let Some(visit) = todo.pop() {
            match visit {
                Visit::Node(Expr::Operand(c)) => folded.push(f(ExprFrame::Operand(*c))?),
                Visit::Node(Expr::Binary(op, left, right)) => {
                    todo.push(Visit::Apply(*op));
                    todo.push(Visit::Node(right));
                    todo.push(Visit::Node(left));
                }
                Visit::Apply(op) => {
                    let right = folded.pop().expect("right operand folded before its operator");
                    let left = folded.pop().expect("left operand folded before its operator");
                    folded.push(f(ExprFrame::Binary(op, left, right))?);
                }
            }
        }

        Ok(folded.pop().expect("a tree folds to exactly one value"))
    }

    pub fn fold<Out>(&self, mut f: impl FnMut(ExprFrame<Out>) -> Out) -> Out {
        match self.try_fold::<Out, Infallible>(|frame| Ok(f(frame))) {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }

    /// Grow a tree from `seed`, asking `expand` for one node per seed.
    pub fn unfold<S>(seed: S, mut expand: impl FnMut(S) -> ExprFrame<S>) -> Expr {
        let mut todo = vec![Grow::Seed(seed)];
        let mut built: Vec<Expr> = Vec::new();

        while let Some(grow) = todo.pop() {
            match grow {
                Grow::Seed(seed) => match expand(seed) {
                    ExprFrame::Operand(c) => built.push(Expr::Operand(c)),
                    ExprFrame::Binary(op, left, right) => {
                        todo.push(Grow::Join(op));
                        todo.push(Grow::Seed(right));
                        todo.push(Grow::Seed(left));
                    }
                },
                Grow::Join(op) => {
                    let right = built.pop().expect("right operand built before its operator");
                    let left = built.pop().expect("left operand built before its operator");
                    built.push(Expr::binary(op, left, right));
                }
            }
        }

        built.pop().expect("a seed grows into exactly one tree")
    }

    /// Parse a postfix expression: pops bind as `(second op first)`.
    pub fn from_postfix(expr: &str) -> Result<Expr> {
        assemble(tokenize_nonempty(expr)?, |first, second| (second, first))
    }

    /// Parse a prefix expression by scanning right to left: pops bind as `(first op second)`.
    pub fn from_prefix(expr: &str) -> Result<Expr> {
        let mut tokens = tokenize_nonempty(expr)?;
        tokens.reverse();
        assemble(tokens, |first, second| (first, second))
    }

    /// Fully parenthesized infix, the same shape `postfix_to_infix` produces.
    pub fn to_infix(&self) -> String {
        self.fold(|frame: ExprFrame<String>| match frame {
            ExprFrame::Operand(c) => c.to_string(),
            ExprFrame::Binary(op, a, b) => format!("({a}{op}{b})"),
        })
    }

    /// Infix with only the parentheses that precedence and left associativity require.
    pub fn to_minimal_infix(&self) -> String {
        let (rendered, _) = self.fold(|frame: ExprFrame<(String, u8)>| match frame {
            ExprFrame::Operand(c) => (c.to_string(), u8::MAX),
            ExprFrame::Binary(op, (a, a_prec), (b, b_prec)) => {
                let prec = op.precedence();
                let a = if a_prec < prec { format!("({a})") } else { a };
                let b = if b_prec <= prec { format!("({b})") } else { b };
                (format!("{a}{op}{b}"), prec)
            }
        });
        rendered
    }

    pub fn to_postfix(&self) -> String {
        self.fold(|frame: ExprFrame<String>| match frame {
            ExprFrame::Operand(c) => c.to_string(),
            ExprFrame::Binary(op, a, b) => format!("{a}{b}{op}"),
        })
    }

    pub fn to_prefix(&self) -> String {
        self.fold(|frame: ExprFrame<String>| match frame {
            ExprFrame::Operand(c) => c.to_string(),
            ExprFrame::Binary(op, a, b) => format!("{op}{a}{b}"),
        })
    }

    pub fn depth(&self) -> usize {
        self.fold(|frame: ExprFrame<usize>| match frame {
            ExprFrame::Operand(_) => 1,
            ExprFrame::Binary(_, a, b) => 1 + a.max(b),
        })
    }

    /// Evaluate with wrapping `i64` arithmetic, looking operands up in `env`.
    pub fn evaluate(&self, env: impl Fn(char) -> Option<i64>) -> std::result::Result<i64, EvalError> {
        self.try_fold(|frame: ExprFrame<i64>| match frame {
            ExprFrame::Operand(c) => env(c).ok_or(EvalError::UnboundOperand { operand: c }),
            ExprFrame::Binary(op, a, b) => op.apply(a, b),
        })
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_minimal_infix())
    }
}

fn tokenize_nonempty(expr: &str) -> Result<Vec<(usize, Token)>> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(ConvertError::EmptyInput);
    }
    tokenize(expr)
}

fn assemble(
    tokens: Vec<(usize, Token)>,
    bind: impl Fn(Expr, Expr) -> (Expr, Expr),
) -> Result<Expr> {
    let mut stack: Vec<Expr> = Vec::new();
    for (position, token) in tokens {
        match token {
            Token::Operand(c) => stack.push(Expr::Operand(c)),
            Token::Operator(op) => {
                let missing = Malformed::MissingOperand {
                    operator: op.symbol(),
                    position,
                };
                let first = stack.pop().ok_or_else(|| missing.clone())?;
                let second = stack.pop().ok_or(missing)?;
                let (a, b) = bind(first, second);
                stack.push(Expr::binary(op, a, b));
            }
            Token::LeftParen | Token::RightParen => {
                return Err(Malformed::UnexpectedParenthesis { position }.into());
            }
        }
    }

    match (stack.pop(), stack.len()) {
        (Some(expr), 0) => Ok(expr),
        (Some(_), rest) => Err(Malformed::DanglingOperands { count: rest + 1 }.into()),
        (None, _) => Err(Malformed::DanglingOperands { count: 0 }.into()),
    }
}
