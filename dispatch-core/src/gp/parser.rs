#[cfg(test)]
#[path = "../../tests/unit/gp/parser_test.rs"]
mod parser_test;

use super::*;
use moea::prelude::GenericResult;

impl GpTree {
    /// Parses a tree from its text form: `(op left right)` for internal nodes and `RTk` or `STk`
    /// for terminals. Unknown operators, out of range indices, terminals of other role and
    /// malformed input are rejected.
    pub fn parse(text: &str, role: Role) -> GenericResult<GpTree> {
        let tokens = tokenize(text);
        let mut nodes = Vec::new();

        let end = parse_expression(&tokens, 0, role, &mut nodes)
            .map_err(|err| err.context(&format!("cannot parse '{text}'")))?;
        if end != tokens.len() {
            return Err(format!("cannot parse '{text}': unexpected token '{}'", tokens[end]).into());
        }

        GpTree::from_nodes(role, nodes)
    }
}

fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (idx, ch) in text.char_indices() {
        match ch {
            '(' | ')' => {
                if let Some(begin) = start.take() {
                    tokens.push(&text[begin..idx]);
                }
                tokens.push(&text[idx..idx + 1]);
            }
            ch if ch.is_whitespace() => {
                if let Some(begin) = start.take() {
                    tokens.push(&text[begin..idx]);
                }
            }
            _ => {
                start.get_or_insert(idx);
            }
        }
    }

    if let Some(begin) = start {
        tokens.push(&text[begin..]);
    }

    tokens
}

/// Parses an expression starting at `position`, returns position after it.
fn parse_expression(tokens: &[&str], position: usize, role: Role, nodes: &mut Vec<GpNode>) -> GenericResult<usize> {
    let token = *tokens.get(position).ok_or("unexpected end of input")?;

    match token {
        "(" => {
            let name = *tokens.get(position + 1).ok_or("missing operator")?;
            let operator = Operator::from_name(name).ok_or_else(|| format!("unknown operator '{name}'"))?;
            nodes.push(GpNode::Internal(operator));

            let right_start = parse_expression(tokens, position + 2, role, nodes)?;
            let end = parse_expression(tokens, right_start, role, nodes)?;

            match tokens.get(end) {
                Some(&")") => Ok(end + 1),
                Some(other) => Err(format!("expected ')', got '{other}'").into()),
                None => Err("missing ')'".into()),
            }
        }
        ")" => Err("unexpected ')'".into()),
        terminal => {
            nodes.push(GpNode::Terminal(parse_feature(terminal, role)?));
            Ok(position + 1)
        }
    }
}

fn parse_feature(token: &str, role: Role) -> GenericResult<Feature> {
    let (token_role, index) = [Role::Routing, Role::Sequencing]
        .into_iter()
        .find_map(|candidate| token.strip_prefix(candidate.prefix()).map(|index| (candidate, index)))
        .ok_or_else(|| format!("unknown terminal '{token}'"))?;

    if token_role != role {
        return Err(format!("terminal '{token}' does not match tree role '{}'", role.tag()).into());
    }

    index
        .parse::<usize>()
        .ok()
        .and_then(|index| Feature::new(role, index))
        .ok_or_else(|| format!("terminal index is out of range in '{token}'").into())
}
