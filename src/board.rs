use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::tree::{Idx, NodeView, Score, ScoreError, ScoreTree};

/// Tree and user index, guarded together by the facade lock.
struct BoardInner {
    tree: ScoreTree,
    users: HashMap<i64, Idx>,
}

/// A live, thread-safe leaderboard.
///
/// One mutex guards the score tree and the user index as a unit. Every
/// public operation holds it for its full duration, so operations are
/// linearizable and the tie-break between equal values ("later wins") is
/// well defined: insertion order is lock-acquisition order.
///
/// # Examples
///
/// ```
/// use scoreboard::{Score, ScoreBoard};
///
/// let board = ScoreBoard::new();
/// board.add(Score { user: 7, value: 120 }).unwrap();
/// board.add(Score { user: 8, value: 90 }).unwrap();
///
/// assert_eq!(board.top(1), vec![Score { user: 7, value: 120 }]);
/// ```
pub struct ScoreBoard {
    inner: Mutex<BoardInner>,
}

impl ScoreBoard {
    /// Constructor.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoreboard::ScoreBoard;
    ///
    /// let board = ScoreBoard::new();
    /// assert!(board.is_empty());
    /// ```
    pub fn new() -> Self {
        ScoreBoard {
            inner: Mutex::new(BoardInner {
                tree: ScoreTree::new(),
                users: HashMap::new(),
            }),
        }
    }

    /// Record a first score for `score.user`.
    ///
    /// Returns [`ScoreError::DuplicateUser`] and leaves the board unchanged
    /// when the user already holds a score; accumulate through [`update`]
    /// instead.
    ///
    /// [`update`]: ScoreBoard::update
    ///
    /// # Examples
    ///
    /// ```
    /// use scoreboard::{Score, ScoreBoard, ScoreError};
    ///
    /// let board = ScoreBoard::new();
    /// assert!(board.add(Score { user: 1, value: 10 }).is_ok());
    /// assert_eq!(
    ///     board.add(Score { user: 1, value: 99 }),
    ///     Err(ScoreError::DuplicateUser)
    /// );
    /// assert_eq!(board.len(), 1);
    /// ```
    pub fn add(&self, score: Score) -> Result<(), ScoreError> {
        let mut inner = self.lock();
        if inner.users.contains_key(&score.user) {
            return Err(ScoreError::DuplicateUser);
        }
        let idx = inner.tree.insert(score);
        inner.users.insert(score.user, idx);
        Ok(())
    }

    /// Fold an increment into an existing user's score and return the new
    /// total.
    ///
    /// The user's cell is removed, the previous value is added to
    /// `score.value`, and the sum is re-inserted, which also moves the user
    /// to the winning side of any tie. Returns
    /// [`ScoreError::UnknownUser`] and leaves the board unchanged when the
    /// user holds no score.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoreboard::{Score, ScoreBoard, ScoreError};
    ///
    /// let board = ScoreBoard::new();
    /// board.add(Score { user: 1, value: 10 }).unwrap();
    ///
    /// assert_eq!(
    ///     board.update(Score { user: 1, value: 5 }),
    ///     Ok(Score { user: 1, value: 15 })
    /// );
    /// assert_eq!(
    ///     board.update(Score { user: 42, value: 5 }),
    ///     Err(ScoreError::UnknownUser)
    /// );
    /// ```
    pub fn update(&self, score: Score) -> Result<Score, ScoreError> {
        let mut inner = self.lock();
        let idx = match inner.users.get(&score.user) {
            Some(idx) => *idx,
            None => return Err(ScoreError::UnknownUser),
        };

        let removed = inner.tree.remove(idx);
        debug_assert_eq!(
            removed.user, score.user,
            "Internal invariant failed: user index pointed at another user's cell!"
        );

        let new_score = Score {
            user: score.user,
            value: removed.score + score.value,
        };
        let new_idx = inner.tree.insert(new_score);
        inner.users.insert(score.user, new_idx);
        Ok(new_score)
    }

    /// The `count` highest scores in descending order, ties broken
    /// later-insertion-first. Yields everything when `count` exceeds the
    /// board size and nothing when `count <= 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoreboard::{Score, ScoreBoard};
    ///
    /// let board = ScoreBoard::new();
    /// board.add(Score { user: 1, value: 10 }).unwrap();
    /// board.add(Score { user: 2, value: 30 }).unwrap();
    /// board.add(Score { user: 3, value: 20 }).unwrap();
    ///
    /// let top = board.top(2);
    /// assert_eq!(
    ///     top,
    ///     vec![Score { user: 2, value: 30 }, Score { user: 3, value: 20 }]
    /// );
    /// assert!(board.top(0).is_empty());
    /// ```
    pub fn top(&self, count: i64) -> Vec<Score> {
        self.lock().tree.top(count)
    }

    /// Scores whose ranks fall in the closed interval
    /// `[position - count, position + count]`, in descending order. Rank 1
    /// is the highest score; a window that misses `[1, len]` yields an empty
    /// result.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoreboard::{Score, ScoreBoard};
    ///
    /// let board = ScoreBoard::new();
    /// for (user, value) in &[(1, 40), (2, 30), (3, 20), (4, 10)] {
    ///     board.add(Score { user: *user, value: *value }).unwrap();
    /// }
    ///
    /// // Ranks 2..=4
    /// assert_eq!(
    ///     board.range(3, 1),
    ///     vec![
    ///         Score { user: 2, value: 30 },
    ///         Score { user: 3, value: 20 },
    ///         Score { user: 4, value: 10 },
    ///     ]
    /// );
    /// assert!(board.range(100, 1).is_empty());
    /// ```
    pub fn range(&self, position: i64, count: i64) -> Vec<Score> {
        self.lock().tree.range(position, count)
    }

    /// Number of scores on the board.
    pub fn len(&self) -> usize {
        self.lock().tree.len()
    }

    /// Inline cell capacity of the backing arena; scores beyond it are
    /// stored on the heap. Set at build time through the
    /// `SCORES_MAX_STACK_ELEMS` environment variable.
    pub fn capacity(&self) -> usize {
        self.lock().tree.capacity()
    }

    /// `true` if no scores have been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().tree.is_empty()
    }

    /// Run `f` on a read-only view of the tree root while holding the facade
    /// lock.
    ///
    /// This is the debugging/inspection surface: renderers walk the
    /// [`NodeView`] capability set over a quiescent tree and copy out
    /// whatever they produce before the lock drops. Keep `f` short; every
    /// other board operation blocks until it returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use scoreboard::{Score, ScoreBoard};
    ///
    /// let board = ScoreBoard::new();
    /// board.add(Score { user: 1, value: 10 }).unwrap();
    ///
    /// let key = board.with_view(|view| view.map(|v| v.key()));
    /// assert_eq!(key, Some(String::from("10 1")));
    /// ```
    pub fn with_view<F, R>(&self, f: F) -> R
    where
        F: for<'a> FnOnce(Option<NodeView<'a>>) -> R,
    {
        let inner = self.lock();
        f(inner.tree.view())
    }

    // A poisoned lock means a mutation panicked mid-flight and the tree may
    // be inconsistent. Refuse to serve from it.
    fn lock(&self) -> MutexGuard<'_, BoardInner> {
        self.inner.lock().expect("scoreboard lock poisoned")
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
