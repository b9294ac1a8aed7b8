//! Abstract syntax tree for QuCPL source programs.
//!
//! The tree mirrors the JSON document the external parser emits:
//! `{"type": "Program", "body": [...]}` with one tagged object per
//! statement. Decoding walks [`serde_json::Value`] rather than deriving
//! `Deserialize`: the statement tag set is open-world, and an unknown
//! `"type"` must be reported as [`CompileError::UnsupportedStatement`]
//! naming the kind.

use serde_json::Value;

use crate::error::{CompileError, CompileResult};

/// A complete source program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Statements in the program.
    pub body: Vec<Statement>,
}

/// A statement in a QuCPL program.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Qubit declaration: `qubit q0, q1;`
    QubitDecl {
        /// Declared qubit names.
        qubits: Vec<Arg>,
    },

    /// Gate application: `h q0;`, `cx q0, q1;`
    QuantumOp {
        /// Source gate name.
        gate: String,
        /// Qubit arguments, possibly nested.
        qubits: Vec<Arg>,
    },

    /// Measurement: `measure q0, q1 -> c0, c1;`
    Measure {
        /// Measured qubit names.
        qubits: Vec<Arg>,
        /// Classical register names, paired positionally.
        classical: Vec<Arg>,
    },

    /// Barrier: `barrier;` or `barrier q0, q1;`
    Barrier {
        /// Target qubit names; empty means all declared qubits.
        qubits: Vec<Arg>,
    },

    /// Report classical register values: `print c0, c1;`
    Print {
        /// Classical register names.
        args: Vec<Arg>,
    },

    /// Decimal→binary conversion demonstration: `convert 6;`
    Convert {
        /// The decimal value.
        value: u64,
    },

    /// Classically-conditioned branch.
    If {
        /// The equality test.
        condition: Condition,
        /// Statements executed when the test holds.
        then_branch: Vec<Statement>,
        /// Statements executed otherwise, if present.
        else_branch: Option<Vec<Statement>>,
    },
}

/// An equality test against a classical register.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Classical register name.
    pub var: String,
    /// Literal the register is compared against.
    pub value: i64,
}

/// An identifier argument, possibly a nested list.
///
/// The parser may emit nested arrays for grouped argument lists; lowering
/// flattens them in source order.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A single name.
    Name(String),
    /// A nested list of arguments.
    List(Vec<Arg>),
}

impl Arg {
    /// A single-name argument.
    pub fn name(name: impl Into<String>) -> Self {
        Arg::Name(name.into())
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Arg::Name(name) => out.push(name),
            Arg::List(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
        }
    }
}

/// Flatten a possibly-nested argument list into names in source order.
pub fn flatten(args: &[Arg]) -> Vec<&str> {
    let mut out = Vec::new();
    for arg in args {
        arg.collect_into(&mut out);
    }
    out
}

impl Program {
    /// Decode a program from JSON text.
    pub fn from_json(source: &str) -> CompileResult<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(&value)
    }

    /// Decode a program from an already-parsed JSON value.
    ///
    /// A bare statement object is accepted and wrapped in a one-statement
    /// program, matching what the parser emits for single-line sources.
    pub fn from_value(value: &Value) -> CompileResult<Self> {
        if kind_of(value)? == "Program" {
            let body = value
                .get("body")
                .and_then(Value::as_array)
                .ok_or_else(|| malformed("Program node without a 'body' array"))?;
            let body = body
                .iter()
                .map(Statement::from_value)
                .collect::<CompileResult<_>>()?;
            Ok(Self { body })
        } else {
            Ok(Self {
                body: vec![Statement::from_value(value)?],
            })
        }
    }
}

impl Statement {
    /// Decode a single statement node.
    pub fn from_value(value: &Value) -> CompileResult<Self> {
        let kind = kind_of(value)?;
        match kind {
            "QubitDecl" => Ok(Statement::QubitDecl {
                qubits: args_field(value, "qubits")?,
            }),
            "QuantumOp" => Ok(Statement::QuantumOp {
                gate: str_field(value, "gate", "QuantumOp")?.to_owned(),
                qubits: args_field(value, "qubits")?,
            }),
            "Measure" => Ok(Statement::Measure {
                qubits: args_field(value, "qubits")?,
                classical: args_field(value, "classical")?,
            }),
            "Barrier" => Ok(Statement::Barrier {
                qubits: args_field(value, "qubits")?,
            }),
            "Print" => Ok(Statement::Print {
                args: args_field(value, "args")?,
            }),
            "Convert" => {
                let raw = value
                    .get("value")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| malformed("Convert node without an integer 'value'"))?;
                Ok(Statement::Convert { value: raw })
            }
            "If" => {
                let condition = value
                    .get("condition")
                    .ok_or_else(|| malformed("If node without a 'condition'"))?;
                let condition = Condition::from_value(condition)?;
                let then_branch = block_field(value, "then")?
                    .ok_or_else(|| malformed("If node without a 'then' block"))?;
                let else_branch = block_field(value, "else")?;
                Ok(Statement::If {
                    condition,
                    then_branch,
                    else_branch,
                })
            }
            other => Err(CompileError::UnsupportedStatement(other.to_owned())),
        }
    }
}

impl Condition {
    fn from_value(value: &Value) -> CompileResult<Self> {
        let var = str_field(value, "var", "Condition")?.to_owned();
        let lit = value
            .get("value")
            .and_then(Value::as_i64)
            .ok_or_else(|| malformed("Condition node without an integer 'value'"))?;
        Ok(Self { var, value: lit })
    }
}

fn malformed(message: &str) -> CompileError {
    CompileError::MalformedAst(message.to_owned())
}

/// Read the `"type"` tag of a statement node.
fn kind_of(value: &Value) -> CompileResult<&str> {
    value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("node without a string 'type' tag"))
}

fn str_field<'a>(value: &'a Value, key: &str, node: &str) -> CompileResult<&'a str> {
    value.get(key).and_then(Value::as_str).ok_or_else(|| {
        CompileError::MalformedAst(format!("{node} node without a string '{key}' field"))
    })
}

/// Read a possibly-nested identifier list. Missing and `null` both decode
/// to an empty list (the parser omits empty argument lists).
fn args_field(value: &Value, key: &str) -> CompileResult<Vec<Arg>> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(vec![]),
        Some(field) => match arg_from_value(field)? {
            Arg::List(items) => Ok(items),
            single => Ok(vec![single]),
        },
    }
}

fn arg_from_value(value: &Value) -> CompileResult<Arg> {
    match value {
        Value::String(name) => Ok(Arg::Name(name.clone())),
        // The parser occasionally emits bare integers for numeric names.
        Value::Number(n) => Ok(Arg::Name(n.to_string())),
        Value::Array(items) => Ok(Arg::List(
            items.iter().map(arg_from_value).collect::<CompileResult<_>>()?,
        )),
        other => Err(CompileError::MalformedAst(format!(
            "expected identifier or list, found {other}"
        ))),
    }
}

/// Read a statement block that may be absent, a single statement, or a list.
fn block_field(value: &Value, key: &str) -> CompileResult<Option<Vec<Statement>>> {
    match value.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(
            items
                .iter()
                .map(Statement::from_value)
                .collect::<CompileResult<_>>()?,
        )),
        Some(single) => Ok(Some(vec![Statement::from_value(single)?])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_program() {
        let source = r#"{
            "type": "Program",
            "body": [
                {"type": "QubitDecl", "qubits": ["q0", "q1"]},
                {"type": "QuantumOp", "gate": "h", "qubits": ["q0"]},
                {"type": "Measure", "qubits": ["q0", "q1"], "classical": ["c0", "c1"]}
            ]
        }"#;
        let program = Program::from_json(source).unwrap();
        assert_eq!(program.body.len(), 3);
        assert!(matches!(
            &program.body[1],
            Statement::QuantumOp { gate, .. } if gate == "h"
        ));
    }

    #[test]
    fn test_decode_bare_statement() {
        let source = r#"{"type": "Convert", "value": 6}"#;
        let program = Program::from_json(source).unwrap();
        assert_eq!(program.body, vec![Statement::Convert { value: 6 }]);
    }

    #[test]
    fn test_decode_nested_args() {
        let source = r#"{"type": "QuantumOp", "gate": "cx", "qubits": [["q0"], "q1"]}"#;
        let program = Program::from_json(source).unwrap();
        match &program.body[0] {
            Statement::QuantumOp { qubits, .. } => {
                assert_eq!(flatten(qubits), vec!["q0", "q1"]);
            }
            other => panic!("Expected QuantumOp, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_if_with_single_then() {
        let source = r#"{
            "type": "If",
            "condition": {"type": "Condition", "var": "c0", "value": 1},
            "then": {"type": "QuantumOp", "gate": "x", "qubits": ["q2"]},
            "else": null
        }"#;
        let program = Program::from_json(source).unwrap();
        match &program.body[0] {
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                assert_eq!(condition.var, "c0");
                assert_eq!(condition.value, 1);
                assert_eq!(then_branch.len(), 1);
                assert!(else_branch.is_none());
            }
            other => panic!("Expected If, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let source = r#"{"type": "While", "body": []}"#;
        let err = Program::from_json(source).unwrap_err();
        match err {
            CompileError::UnsupportedStatement(kind) => assert_eq!(kind, "While"),
            other => panic!("Expected UnsupportedStatement, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let source = r#"{"type": "QuantumOp", "qubits": ["q0"]}"#;
        assert!(matches!(
            Program::from_json(source),
            Err(CompileError::MalformedAst(_))
        ));
    }
}
