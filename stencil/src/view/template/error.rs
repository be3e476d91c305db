use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("syntax error on line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: &'static str,
    },

    #[error("expression \"{expression}\" on line {line}, column {column} is not a variable path")]
    ExpressionSyntax {
        expression: String,
        line: usize,
        column: usize,
    },

    #[error("reached end of template looking for \"{close}\" (opened on line {line}, column {column}), did you forget a closing tag?")]
    Eof {
        close: String,
        line: usize,
        column: usize,
    },

    #[error("variable \"{0}\" is not defined or in scope")]
    UndefinedVariable(String),
}
