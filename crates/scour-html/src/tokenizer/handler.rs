use scour_common::MalformedInputError;

use super::core::MarkupTokenizer;
use super::token::{Attribute, Token};
use crate::classification::ClassificationConfig;

/// Receiver for the events of [`parse`].
///
/// Every method defaults to doing nothing. Returning an error from a method
/// aborts the parse and hands the error to the caller.
pub trait TokenHandler {
    /// An element opened. `unary` elements get no matching [`Self::on_end`].
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_start(
        &mut self,
        _name: &str,
        _attributes: &[Attribute],
        _unary: bool,
    ) -> Result<(), MalformedInputError> {
        Ok(())
    }

    /// An element closed, explicitly or implicitly.
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_end(&mut self, _name: &str) -> Result<(), MalformedInputError> {
        Ok(())
    }

    /// Character data.
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_text(&mut self, _text: &str) -> Result<(), MalformedInputError> {
        Ok(())
    }

    /// The interior of a comment.
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_comment(&mut self, _text: &str) -> Result<(), MalformedInputError> {
        Ok(())
    }

    /// The literal body of a raw-content element named `name`.
    ///
    /// # Errors
    ///
    /// Any error aborts the parse.
    fn on_raw_escape(&mut self, _text: &str, _name: &str) -> Result<(), MalformedInputError> {
        Ok(())
    }
}

/// Tokenize `markup` to completion, dispatching each token to `handler`.
///
/// # Errors
///
/// Returns [`MalformedInputError::Stalled`] if the tokenizer loses forward
/// progress, or the first error a handler method returns.
pub fn parse<H: TokenHandler + ?Sized>(
    markup: &str,
    handler: &mut H,
    config: &ClassificationConfig,
) -> Result<(), MalformedInputError> {
    for token in MarkupTokenizer::new(markup, config) {
        match token? {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => handler.on_start(&name, &attributes, self_closing)?,
            Token::EndTag { name } => handler.on_end(&name)?,
            Token::Text { data } => handler.on_text(&data)?,
            Token::Comment { data } => handler.on_comment(&data)?,
            Token::RawEscape { name, data } => handler.on_raw_escape(&data, &name)?,
        }
    }
    Ok(())
}
