use super::*;
use bytes::Buf;
use log::{debug, trace};

/// Token kinds produced by [`Parser::next_token`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token {
    /// End of input, or a byte that is not a tag.
    Eof,
    /// A scalar; its payload is available through [`Parser::token_value`].
    Data,
    /// `[`
    ArrayOpen,
    /// `]`
    ArrayClose,
    /// `{`
    ObjectOpen,
    /// `}`
    ObjectClose,
}

impl Token {
    /// Indicates whether the token closes a structure. Either close tag ends any open
    /// structure.
    pub fn is_close(self) -> bool {
        match self {
            Token::ArrayClose | Token::ObjectClose => true,
            _ => false,
        }
    }
}

/// Parse state for a single decode.
///
/// The parser holds one token of lookahead: [`Parser::token`] is the token under the
/// cursor and [`Parser::token_value`] its payload. String payloads are slices of the
/// source buffer, so no string bytes are copied.
///
/// # Example
///
/// ```
/// use ubj::{encoding::{Parser, Token}, prelude::*};
///
/// let mut p = Parser::new(Bytes::from_static(b"[U\x01]"), &Config::default());
///
/// assert_eq!(p.next_token().unwrap(), Token::ArrayOpen);
/// assert_eq!(p.next_token().unwrap(), Token::Data);
/// assert_eq!(p.token_value(), Some(&Ubj::UInt8(1)));
/// assert_eq!(p.next_token().unwrap(), Token::ArrayClose);
/// assert_eq!(p.next_token().unwrap(), Token::Eof);
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    src: Bytes,
    offset: usize,
    token: Token,
    value: Option<Ubj>,
    shape: Shape,
    max_depth: usize,
    depth: usize,
}

impl Parser {
    /// Creates a parser positioned before the first token of `src`.
    pub fn new(src: Bytes, config: &Config) -> Self {
        Parser {
            src,
            offset: 0,
            token: Token::Eof,
            value: None,
            shape: config.shape,
            max_depth: config.max_depth,
            depth: 0,
        }
    }

    /// Current byte offset into the source.
    pub fn offset(&self) -> usize { self.offset }

    /// Number of bytes left after the cursor.
    pub fn remaining(&self) -> usize { self.src.len() - self.offset }

    /// The current token.
    pub fn token(&self) -> Token { self.token }

    /// Payload of the current token, if it is [`Token::Data`].
    pub fn token_value(&self) -> Option<&Ubj> { self.value.as_ref() }

    /// Reads the first token and decodes one complete value. Anything after that value
    /// is left unread.
    pub fn parse(mut self) -> Result<Ubj, Error> {
        self.next_token()?;
        self.decode_value()
    }

    #[inline]
    fn read(&mut self, len: usize) -> Result<Bytes, Error> {
        if len > self.remaining() {
            return Err(Error::TruncatedInput {
                offset: self.offset,
                needed: len,
                remaining: self.remaining(),
            });
        }
        let out = self.src.slice(self.offset..self.offset + len);
        self.offset += len;
        Ok(out)
    }

    /// Reads the payload of an integer tag. Returns `None` if `tag` is not one.
    #[inline]
    fn read_int(&mut self, tag: u8) -> Result<Option<Ubj>, Error> {
        let i = match tag {
            INT8 => Int8(self.read(1)?.get_i8()),
            UINT8 => UInt8(self.read(1)?.get_u8()),
            INT16 => Int16(self.read(2)?.get_i16_le()),
            INT32 => Int32(self.read(4)?.get_i32_le()),
            _ => return Ok(None),
        };
        Ok(Some(i))
    }

    fn read_str(&mut self) -> Result<Bytes, Error> {
        let at = self.offset;
        let len_tag = self.read(1)?.get_u8();

        let len = match self.read_int(len_tag)?.and_then(|n| n.as_i64()) {
            Some(len) if len >= 0 => len as usize,
            _ => {
                return Err(Error::MalformedLength {
                    tag: len_tag,
                    offset: at,
                })
            }
        };

        self.read(len)
    }

    /// Advances past the next token, storing its kind and payload.
    ///
    /// # Errors
    ///
    /// Fails on reserved tags, malformed string lengths and payloads running past the
    /// end of the input.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.token = Token::Eof;
        self.value = None;

        if self.offset >= self.src.len() {
            return Ok(Token::Eof);
        }

        let at = self.offset;
        let tag = self.src[at];
        self.offset += 1;

        let value = match tag {
            NULL => Null,
            TRUE => Bool(true),
            FALSE => Bool(false),
            INT8 | UINT8 | INT16 | INT32 => self.read_int(tag)?.unwrap_or(Null),
            FLOAT => Float32(self.read(4)?.get_f32_le()),
            CHAR => Char(self.read(1)?.get_u8()),
            STRING | HIGH_PRECISION => Str(self.read_str()?),
            ARRAY_OPEN => return Ok(self.structural(Token::ArrayOpen)),
            ARRAY_CLOSE => return Ok(self.structural(Token::ArrayClose)),
            OBJECT_OPEN => return Ok(self.structural(Token::ObjectOpen)),
            OBJECT_CLOSE => return Ok(self.structural(Token::ObjectClose)),
            INT64 | DOUBLE | NOOP => return Err(Error::UnsupportedTag { tag, offset: at }),
            _ => {
                debug!("unknown tag {:#04x} at offset {}, stopping", tag, at);
                return Ok(Token::Eof);
            }
        };

        self.token = Token::Data;
        self.value = Some(value);
        Ok(Token::Data)
    }

    fn structural(&mut self, token: Token) -> Token {
        self.token = token;
        token
    }

    /// Decodes the value starting at the current token.
    ///
    /// A scalar is returned and the parser advances past it; an opening tag is decoded
    /// as a whole structure. At the end of input, or on a stray close tag, this yields
    /// [`Ubj::Null`] without advancing.
    pub fn decode_value(&mut self) -> Result<Ubj, Error> {
        match self.token {
            Token::Data => {
                let value = self.value.take().unwrap_or(Null);
                self.next_token()?;
                Ok(value)
            }
            Token::ArrayOpen | Token::ObjectOpen => self.decode_struct(),
            _ => Ok(Null),
        }
    }

    /// Decodes a structure, starting at its opening token and ending after its closing
    /// one.
    ///
    /// If the input ends before the closing tag, the entries read so far are returned
    /// as if the structure had been closed. A truncated stream is therefore not always
    /// detected here.
    fn decode_struct(&mut self) -> Result<Ubj, Error> {
        let open = self.token;
        if self.depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        trace!("{:?} at offset {}, depth {}", open, self.offset - 1, self.depth);

        let keyed = open == Token::ObjectOpen;
        let as_map = keyed && self.shape == Shape::Object;
        let mut map = VecMap::new();
        let mut arr = Vec::new();

        let mut token = self.next_token()?;
        while token != Token::Eof && !token.is_close() {
            let key = if keyed {
                let key = self.take_key()?;
                self.next_token()?;
                Some(key)
            } else {
                None
            };

            let value = self.decode_value()?;
            match key {
                Some(key) if as_map => {
                    map.insert(key, value);
                }
                _ => arr.push(value),
            }

            token = self.token;
        }

        if token == Token::Eof {
            debug!("input ended inside {:?}, closing it implicitly", open);
        }

        self.depth -= 1;
        // consume the close tag
        self.next_token()?;

        Ok(if as_map { Map(map) } else { Array(arr) })
    }

    fn take_key(&mut self) -> Result<Bytes, Error> {
        match self.value.take() {
            Some(v) => Ok(v.into_key()),
            None => Err(Error::InvalidKey {
                offset: self.offset,
            }),
        }
    }
}
