//! Reference numbers for detail-on-demand terms in the SVG projection.
//!
//! SVG output cannot host the interactive popups the HTML projection uses,
//! so each detail term is followed by a superscript number pointing at a
//! footnote list the caller renders elsewhere. Numbers are the term's
//! 1-based position in the caller's ordered reference list.

use std::collections::HashMap;

use log::{debug, trace};

use crate::{
    measure::TextMeasurer,
    tokens::{Container, ContainerKind, Token},
};

/// Append a superscript reference number to every detail term listed in
/// `references`.
///
/// Runs over the unbroken token sequence so the superscript is measured
/// and may move to the next line with the term. Children are numbered
/// before their parent. Terms missing from `references` are left alone.
///
/// # Examples
///
/// ```
/// use mdtextwrap::{
///     measure::{FontParams, MonospaceMeasurer},
///     references::append_reference_numbers,
///     tokens::{ContainerKind, Token},
/// };
///
/// let m = MonospaceMeasurer::with_advance(1.0);
/// let font = FontParams::sized(1.0);
/// let term = Token::container(
///     ContainerKind::DetailOnDemand { term: "gdp".into() },
///     font.clone(),
///     vec![Token::text("GDP", font, &m)],
/// );
/// let refs = vec!["pop".to_string(), "gdp".to_string()];
/// let numbered = append_reference_numbers(vec![term], &refs, &m);
/// assert_eq!(numbered[0].to_plaintext(), "GDP2");
/// ```
#[must_use]
pub fn append_reference_numbers(
    tokens: Vec<Token>,
    references: &[String],
    measurer: &dyn TextMeasurer,
) -> Vec<Token> {
    let positions: HashMap<&str, usize> = references
        .iter()
        .enumerate()
        .rev()
        .map(|(index, id)| (id.as_str(), index + 1))
        .collect();
    number_tokens(tokens, &positions, measurer)
}

fn number_tokens(
    tokens: Vec<Token>,
    positions: &HashMap<&str, usize>,
    measurer: &dyn TextMeasurer,
) -> Vec<Token> {
    tokens
        .into_iter()
        .map(|token| match token {
            Token::Container(container) => {
                Token::Container(number_container(&container, positions, measurer))
            }
            other => other,
        })
        .collect()
}

fn number_container(
    container: &Container,
    positions: &HashMap<&str, usize>,
    measurer: &dyn TextMeasurer,
) -> Container {
    let mut children = number_tokens(container.children().to_vec(), positions, measurer);
    if let ContainerKind::DetailOnDemand { term } = container.kind() {
        match positions.get(term.as_str()) {
            Some(number) => {
                trace!("numbering detail term {term} as {number}");
                children.push(Token::superscript(
                    number.to_string(),
                    container.font().clone(),
                    measurer,
                ));
            }
            None => debug!("detail term {term} has no reference number"),
        }
    }
    container.with_children(children)
}
