//! Reader for the `machine`/`login`/`password` credential file convention.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NetrcError {
    #[error("unexpected token {0:?}")]
    UnexpectedToken(String),

    #[error("missing value for {0:?}")]
    MissingValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Machine {
    /// `None` for the `default` entry.
    pub name: Option<String>,
    pub login: String,
    pub password: String,
    pub account: Option<String>,
}

#[derive(Debug, Default)]
pub struct Netrc {
    machines: Vec<Machine>,
}

impl Netrc {
    pub fn parse(contents: &str) -> Result<Self, NetrcError> {
        let mut machines = Vec::new();
        let mut current: Option<Machine> = None;
        let mut lines = contents.lines();

        while let Some(line) = lines.next() {
            let mut tokens = strip_comment(line).split_whitespace();
            while let Some(token) = tokens.next() {
                match token {
                    "machine" => {
                        let name = value_for(token, &mut tokens)?;
                        machines.extend(current.take());
                        current = Some(Machine {
                            name: Some(name),
                            ..Default::default()
                        });
                    }
                    "default" => {
                        machines.extend(current.take());
                        current = Some(Machine::default());
                    }
                    "login" | "password" | "account" | "port" => {
                        let value = value_for(token, &mut tokens)?;
                        let machine = current
                            .as_mut()
                            .ok_or_else(|| NetrcError::UnexpectedToken(token.to_owned()))?;
                        match token {
                            "login" => machine.login = value,
                            "password" => machine.password = value,
                            "account" => machine.account = Some(value),
                            _ => {}
                        }
                    }
                    "macdef" => {
                        value_for(token, &mut tokens)?;
                        // macro body runs until the next blank line
                        for body in lines.by_ref() {
                            if body.trim().is_empty() {
                                break;
                            }
                        }
                        break;
                    }
                    other => return Err(NetrcError::UnexpectedToken(other.to_owned())),
                }
            }
        }
        machines.extend(current);

        Ok(Self { machines })
    }

    /// Exact host lookup. The `default` entry never matches.
    pub fn find_machine(&self, host: &str) -> Option<&Machine> {
        self.machines
            .iter()
            .find(|m| m.name.as_deref() == Some(host))
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(i) => &line[..i],
        None => line,
    }
}

fn value_for<'a>(
    keyword: &str,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<String, NetrcError> {
    tokens
        .next()
        .map(str::to_owned)
        .ok_or_else(|| NetrcError::MissingValue(keyword.to_owned()))
}
