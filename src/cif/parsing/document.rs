//! Document assembler
//!
//! Walks the whole token stream and groups it into data blocks. It is the
//! caller of the loop parser: every `loop_` marker is consumed here and the
//! cursor is handed to [`parse_loop`], which stops at the next data name,
//! block marker or end of input.
//!
//! ```text
//! data_example
//! _cell.length_a 5.4
//! loop_
//! _atom.id _atom.type
//! 1 C 2 O
//! save_frame
//!   _note 'inside a frame'
//! save_
//! ```

use crate::cif::ast::{DataBlock, Document, Item};
use crate::cif::error::{ParseError, ParseErrorKind};
use crate::cif::lexing::{tokenize_with_spans, Token, TokenSpan};

use super::cursor::TokenCursor;
use super::loop_block::parse_loop;
use super::ParseOptions;

/// Lex and parse a complete source
pub fn parse_document(source: &str, options: &ParseOptions) -> crate::cif::Result<Document> {
    let tokens = tokenize_with_spans(source)?;
    Ok(assemble(&tokens, source.len(), options)?)
}

/// Assemble a document from tokens
///
/// `end_offset` is reported for errors found at end of input.
pub fn assemble(
    tokens: &[TokenSpan],
    end_offset: usize,
    options: &ParseOptions,
) -> Result<Document, ParseError> {
    let assembler = Assembler {
        cursor: TokenCursor::new(tokens, end_offset),
        options,
        blocks: Vec::new(),
        current: None,
        frame: None,
    };
    let document = assembler.run()?;
    tracing::debug!(blocks = document.blocks.len(), "assembled document");
    Ok(document)
}

struct OpenFrame {
    name: String,
    items: Vec<Item>,
    offset: usize,
    token_index: usize,
}

struct Assembler<'t, 'o> {
    cursor: TokenCursor<'t>,
    options: &'o ParseOptions,
    blocks: Vec<DataBlock>,
    current: Option<DataBlock>,
    frame: Option<OpenFrame>,
}

impl<'t, 'o> Assembler<'t, 'o> {
    fn run(mut self) -> Result<Document, ParseError> {
        while let Some((token, span)) = self.cursor.peek_with_span() {
            let offset = span.start;
            let index = self.cursor.index();

            match token {
                Token::Comment(_) => {
                    self.cursor.advance();
                }
                Token::DataBlock(name) => {
                    self.ensure_frame_closed()?;
                    self.cursor.advance();
                    if let Some(block) = self.current.take() {
                        self.blocks.push(block);
                    }
                    self.current = Some(DataBlock::new(Some(name.clone())));
                }
                Token::SaveFrame(name) if name.is_empty() => {
                    let frame = self.frame.take().ok_or_else(|| {
                        ParseError::new(ParseErrorKind::UnexpectedSaveFrameEnd, offset, index)
                    })?;
                    self.cursor.advance();
                    self.push_item(
                        Item::SaveFrame {
                            name: frame.name,
                            items: frame.items,
                        },
                        token,
                        offset,
                        index,
                    )?;
                }
                Token::SaveFrame(name) => {
                    if let Some(outer) = &self.frame {
                        return Err(ParseError::new(
                            ParseErrorKind::NestedSaveFrame {
                                name: name.clone(),
                                outer: outer.name.clone(),
                            },
                            offset,
                            index,
                        ));
                    }
                    self.ensure_block(token, offset, index)?;
                    self.cursor.advance();
                    self.frame = Some(OpenFrame {
                        name: name.clone(),
                        items: Vec::new(),
                        offset,
                        token_index: index,
                    });
                }
                Token::Loop => {
                    self.ensure_block(token, offset, index)?;
                    self.cursor.advance();
                    let lp = parse_loop(&mut self.cursor, self.options)?;
                    self.push_item(Item::Loop(lp), token, offset, index)?;
                }
                Token::DataName(tag) => {
                    self.ensure_block(token, offset, index)?;
                    self.cursor.advance();
                    let value = self.read_pair_value().ok_or_else(|| {
                        ParseError::new(
                            ParseErrorKind::MissingValue { tag: tag.clone() },
                            offset,
                            index,
                        )
                    })?;
                    self.push_item(
                        Item::Pair {
                            tag: tag.clone(),
                            value,
                        },
                        token,
                        offset,
                        index,
                    )?;
                }
                other => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedToken {
                            found: other.describe(),
                        },
                        offset,
                        index,
                    ));
                }
            }
        }

        self.ensure_frame_closed()?;
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
        Ok(Document::new(self.blocks))
    }

    /// The value of a tag-value pair: the next value token, skipping comments
    fn read_pair_value(&mut self) -> Option<crate::cif::ast::Value> {
        while let Some(token) = self.cursor.peek() {
            if let Some(value) = token.to_value() {
                self.cursor.advance();
                return Some(value);
            }
            if !token.is_comment() {
                return None;
            }
            self.cursor.advance();
        }
        None
    }

    /// Make sure there is a block to add to, opening an anonymous one if allowed
    fn ensure_block(&mut self, token: &Token, offset: usize, index: usize) -> Result<(), ParseError> {
        if self.current.is_some() {
            return Ok(());
        }
        if self.options.require_data_block {
            return Err(ParseError::new(
                ParseErrorKind::ContentOutsideDataBlock {
                    found: token.describe(),
                },
                offset,
                index,
            ));
        }
        self.current = Some(DataBlock::new(None));
        Ok(())
    }

    fn push_item(
        &mut self,
        item: Item,
        token: &Token,
        offset: usize,
        index: usize,
    ) -> Result<(), ParseError> {
        if let Some(frame) = self.frame.as_mut() {
            frame.items.push(item);
            return Ok(());
        }
        self.ensure_block(token, offset, index)?;
        if let Some(block) = self.current.as_mut() {
            block.items.push(item);
        }
        Ok(())
    }

    fn ensure_frame_closed(&self) -> Result<(), ParseError> {
        match &self.frame {
            Some(frame) => Err(ParseError::new(
                ParseErrorKind::UnterminatedSaveFrame {
                    name: frame.name.clone(),
                },
                frame.offset,
                frame.token_index,
            )),
            None => Ok(()),
        }
    }
}
