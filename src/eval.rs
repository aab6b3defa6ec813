// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Evaluate a plural formula for a range of numbers.

use std::sync::Arc;

use colored::Colorize;
use mocat::{
    config::Config,
    error::Result,
    plural::{
        compile::Program,
        forms::PluralForms,
        generator::PluralBackend,
        parser::AstParser,
        rule::PluralRule,
        token::Ast,
    },
};
use serde::Serialize;
use tracing::debug;

use crate::args;

#[derive(Debug, Serialize)]
struct Evaluation {
    n: i64,
    index: Option<i64>,
    error: Option<String>,
}

enum Evaluator {
    /// `nplurals` is known: indexes are checked.
    Rule(Arc<dyn PluralRule>),
    /// Bare expression: raw values.
    Tree(Ast),
    Compiled(Program),
}

impl Evaluator {
    fn new(formula: &str, backend: PluralBackend) -> Result<Self> {
        let (nplurals, expression) = if formula.contains("plural") && formula.contains('=') {
            let forms = PluralForms::parse(formula)?;
            (Some(forms.nplurals), forms.formula)
        } else {
            (None, formula.to_string())
        };
        let ast = AstParser::parse(&expression)?;
        debug!("Parsed expression: {ast}");
        Ok(match (nplurals, backend) {
            (Some(nplurals), _) => Evaluator::Rule(backend.build(nplurals, ast)?),
            (None, PluralBackend::Tree) => Evaluator::Tree(ast),
            (None, PluralBackend::Compiled) => {
                let program = Program::compile(&ast);
                debug!("Compiled program: {:?}", program.instructions());
                Evaluator::Compiled(program)
            }
        })
    }

    fn evaluate(&self, n: i64) -> Evaluation {
        let (index, error) = match self {
            Evaluator::Rule(rule) => match rule.plural_index(n) {
                Ok(index) => (i64::try_from(index).ok(), None),
                Err(err) => (None, Some(err.to_string())),
            },
            Evaluator::Tree(ast) => (Some(ast.evaluate(n)), None),
            Evaluator::Compiled(program) => (Some(program.run(n)), None),
        };
        Evaluation { n, index, error }
    }
}

/// Evaluate the formula and return the exit code.
pub fn run_eval(args: &args::EvalArgs, config: &Config) -> i32 {
    let backend = if args.compiled {
        PluralBackend::Compiled
    } else {
        config.plural.backend
    };
    let evaluator = match Evaluator::new(&args.formula, backend) {
        Ok(evaluator) => evaluator,
        Err(err) => {
            eprintln!("{}: {err}", "Error".bright_red().bold());
            return 1;
        }
    };
    let evaluations: Vec<Evaluation> = (args.from..=args.to)
        .map(|n| evaluator.evaluate(n))
        .collect();
    match args.output {
        args::OutputFormat::Human => {
            for evaluation in &evaluations {
                match (&evaluation.index, &evaluation.error) {
                    (Some(index), _) => println!("{}: {index}", evaluation.n),
                    (None, Some(error)) => println!(
                        "{}: {}: {error}",
                        evaluation.n,
                        "Error".bright_red().bold()
                    ),
                    (None, None) => {}
                }
            }
        }
        args::OutputFormat::Json => {
            println!("{}", serde_json::to_string(&evaluations).unwrap_or_default());
        }
    }
    i32::from(evaluations.iter().any(|evaluation| evaluation.error.is_some()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexes(formula: &str, backend: PluralBackend) -> Vec<Option<i64>> {
        let evaluator = Evaluator::new(formula, backend).unwrap();
        (0..6).map(|n| evaluator.evaluate(n).index).collect()
    }

    #[test]
    fn test_bare_expression() {
        let expected: Vec<Option<i64>> = vec![Some(1), Some(0), Some(1), Some(1), Some(1), Some(1)];
        assert_eq!(indexes("n != 1", PluralBackend::Tree), expected);
        assert_eq!(indexes("n != 1", PluralBackend::Compiled), expected);
        // No range check without nplurals.
        assert_eq!(indexes("n * 2", PluralBackend::Tree)[5], Some(10));
    }

    #[test]
    fn test_header_value() {
        assert_eq!(
            indexes("nplurals=3; plural=n==1 ? 0 : n==2 ? 1 : 2;", PluralBackend::Compiled),
            [Some(2), Some(0), Some(1), Some(2), Some(2), Some(2)]
        );
        let evaluator = Evaluator::new("nplurals=2; plural=n;", PluralBackend::Tree).unwrap();
        let evaluation = evaluator.evaluate(2);
        assert_eq!(evaluation.index, None);
        assert!(evaluation.error.is_some());
    }

    #[test]
    fn test_invalid_formula() {
        assert!(Evaluator::new("n ==", PluralBackend::Tree).is_err());
        assert!(Evaluator::new("nplurals=x; plural=n;", PluralBackend::Tree).is_err());
    }
}
