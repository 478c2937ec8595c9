//! Arena-backed doubly linked token list.
//!
//!     Every layout pass mutates one shared list: whitespace tokens are resized,
//!     inserted and removed while outer callers may still hold ids of neighbouring
//!     tokens. Tokens therefore live in slots of a growable arena and refer to each
//!     other through [`TokenId`]s instead of pointers.
//!
//!     A [`TokenId`] pairs a slot index with the slot's generation. Removing a token
//!     bumps the generation of its slot, so an id that outlived its token resolves to
//!     `None` through [`TokenStream::get`] instead of silently aliasing whatever token
//!     reuses the slot later.
//!
//! Traversal
//!
//!     Forward and backward traversal start from any live id. The skip helpers mirror
//!     what the indentation walker needs: find the next token with a given class and
//!     text, or the next token that is neither whitespace nor comment.

use super::token::{Token, TokenClass};
use std::ops::{Index, IndexMut};

/// Stable handle to a token inside a [`TokenStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId {
    index: u32,
    generation: u32,
}

impl TokenId {
    /// Slot index, only meaningful for debugging.
    pub fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone)]
struct Node {
    token: Token,
    prev: Option<TokenId>,
    next: Option<TokenId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Ordered, doubly linked sequence of tokens. An empty stream has no head.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<TokenId>,
    tail: Option<TokenId>,
    len: usize,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link the tokens in iteration order. Positions and flags are taken as given.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut stream = Self::new();
        for token in tokens {
            stream.push_back(token);
        }
        stream
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<TokenId> {
        self.head
    }

    pub fn tail(&self) -> Option<TokenId> {
        self.tail
    }

    /// Whether `id` still refers to a live token of this stream.
    pub fn contains(&self, id: TokenId) -> bool {
        self.node(id).is_some()
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.node(id).map(|node| &node.token)
    }

    pub fn get_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.node_mut(id).map(|node| &mut node.token)
    }

    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        self.node(id).and_then(|node| node.next)
    }

    pub fn prev(&self, id: TokenId) -> Option<TokenId> {
        self.node(id).and_then(|node| node.prev)
    }

    /// Append a token at the end of the stream.
    pub fn push_back(&mut self, token: Token) -> TokenId {
        let tail = self.tail;
        let id = self.alloc(Node {
            token,
            prev: tail,
            next: None,
        });
        match tail {
            Some(tail) => self.set_next(tail, Some(id)),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Splice `token` in directly before `anchor`.
    ///
    /// `anchor` must be live.
    pub fn insert_before(&mut self, anchor: TokenId, token: Token) -> TokenId {
        let prev = self.prev(anchor);
        let id = self.alloc(Node {
            token,
            prev,
            next: Some(anchor),
        });
        match prev {
            Some(prev) => self.set_next(prev, Some(id)),
            None => self.head = Some(id),
        }
        self.set_prev(anchor, Some(id));
        id
    }

    /// Splice `token` in directly after `anchor`.
    ///
    /// `anchor` must be live.
    pub fn insert_after(&mut self, anchor: TokenId, token: Token) -> TokenId {
        let next = self.next(anchor);
        let id = self.alloc(Node {
            token,
            prev: Some(anchor),
            next,
        });
        match next {
            Some(next) => self.set_prev(next, Some(id)),
            None => self.tail = Some(id),
        }
        self.set_next(anchor, Some(id));
        id
    }

    /// Unlink and return the token. Its id, and any copy of it, goes stale.
    pub fn remove(&mut self, id: TokenId) -> Option<Token> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;

        match node.prev {
            Some(prev) => self.set_next(prev, node.next),
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.set_prev(next, node.prev),
            None => self.tail = node.prev,
        }
        Some(node.token)
    }

    /// Iterate from the head to the tail.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stream: self,
            cursor: self.head,
            direction: Direction::Forward,
        }
    }

    /// Iterate forward starting at `start` (included).
    pub fn iter_from(&self, start: TokenId) -> Iter<'_> {
        Iter {
            stream: self,
            cursor: Some(start).filter(|id| self.contains(*id)),
            direction: Direction::Forward,
        }
    }

    /// Iterate backward starting at `start` (included).
    pub fn iter_back_from(&self, start: TokenId) -> Iter<'_> {
        Iter {
            stream: self,
            cursor: Some(start).filter(|id| self.contains(*id)),
            direction: Direction::Backward,
        }
    }

    /// Ids of every token flagged as the first of its line, in order.
    pub fn line_starts(&self) -> Vec<TokenId> {
        self.iter()
            .filter(|(_, token)| token.flags.begins_line)
            .map(|(id, _)| id)
            .collect()
    }

    /// Last token of the line `id` sits on: the first token at or after `id`
    /// carrying `ends_line`, or the tail when none does.
    pub fn line_end(&self, id: TokenId) -> Option<TokenId> {
        let mut last = None;
        for (current, token) in self.iter_from(id) {
            last = Some(current);
            if token.flags.ends_line {
                break;
            }
        }
        last
    }

    /// First token at or after `from` whose class is `class` and whose text
    /// matches `text` case-insensitively.
    pub fn skip_until(&self, from: TokenId, class: TokenClass, text: &str) -> Option<TokenId> {
        self.iter_from(from)
            .find(|(_, token)| token.matches(class, text))
            .map(|(id, _)| id)
    }

    /// First token strictly after `after` that is neither whitespace nor comment.
    pub fn skip_whitespace_and_comments(&self, after: TokenId) -> Option<TokenId> {
        let next = self.next(after)?;
        self.iter_from(next)
            .find(|(_, token)| !token.is_trivia())
            .map(|(id, _)| id)
    }

    /// Clones of the tokens in order, without links.
    pub fn to_vec(&self) -> Vec<Token> {
        self.iter().map(|(_, token)| token.clone()).collect()
    }

    fn alloc(&mut self, node: Node) -> TokenId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return TokenId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        TokenId {
            index,
            generation: 0,
        }
    }

    fn node(&self, id: TokenId) -> Option<&Node> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: TokenId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn set_next(&mut self, id: TokenId, next: Option<TokenId>) {
        if let Some(node) = self.node_mut(id) {
            node.next = next;
        }
    }

    fn set_prev(&mut self, id: TokenId, prev: Option<TokenId>) {
        if let Some(node) = self.node_mut(id) {
            node.prev = prev;
        }
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}

impl Index<TokenId> for TokenStream {
    type Output = Token;

    /// Panics when `id` is stale, like out-of-bounds slice indexing.
    fn index(&self, id: TokenId) -> &Token {
        match self.get(id) {
            Some(token) => token,
            None => panic!("stale token id {id:?}"),
        }
    }
}

impl IndexMut<TokenId> for TokenStream {
    fn index_mut(&mut self, id: TokenId) -> &mut Token {
        match self.get_mut(id) {
            Some(token) => token,
            None => panic!("stale token id {id:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

/// Cursor over `(id, token)` pairs.
pub struct Iter<'a> {
    stream: &'a TokenStream,
    cursor: Option<TokenId>,
    direction: Direction,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (TokenId, &'a Token);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.stream.node(id)?;
        self.cursor = match self.direction {
            Direction::Forward => node.next,
            Direction::Backward => node.prev,
        };
        Some((id, &node.token))
    }
}
