/*!
Live leaderboard over an order-statistics binary search tree.

Per-user scores live in an arena-backed BST keyed by value and augmented with
exact left/right subtree sizes, so the two ranked queries (the top-K highest
scores and a window of scores around a given rank) prune whole subtrees with
the size counters instead of walking the tree.

* Safe: `#![forbid(unsafe_code)]`.
* Recursion-free core: descent, traversal, and the rank-window search all run
  on explicit loops and worklists, so query stack use does not depend on tree
  shape.
* Thread safe: one mutex guards the tree and the user index as a unit, making
  every operation linearizable.

### About

The tree is deliberately *unbalanced*: scores arrive roughly shuffled in
practice and the structure favors simple, verifiable size bookkeeping over
rotation machinery. Adversarial insertion order degrades queries to linear
time; that trade-off is accepted.

Equal values tie-break by recency. An insert sends ties into the right
subtree and queries enumerate right-subtree-first, so of two equal scores the
one recorded later ranks higher.

[`ScoreBoard::update`] accumulates: it removes the user's node, adds the
previous value to the increment, and re-inserts, which also refreshes the
user's tie-break position.

### Usage

```
use scoreboard::{Score, ScoreBoard};

let board = ScoreBoard::new();

board.add(Score { user: 1, value: 30 }).unwrap();
board.add(Score { user: 2, value: 45 }).unwrap();
board.add(Score { user: 3, value: 45 }).unwrap();

// Ties rank the later insertion higher.
assert_eq!(
    board.top(2),
    vec![Score { user: 3, value: 45 }, Score { user: 2, value: 45 }]
);

// Increments fold into the existing value.
let new_total = board.update(Score { user: 1, value: 20 }).unwrap();
assert_eq!(new_total, Score { user: 1, value: 50 });

// All ranks within distance 1 of rank 2.
assert_eq!(
    board.range(2, 1),
    vec![
        Score { user: 1, value: 50 },
        Score { user: 3, value: 45 },
        Score { user: 2, value: 45 },
    ]
);
```

### Stack Capacity: Important Context

The arena stores up to `STACK_ELEMS` cells inline before spilling to the
heap. The constant is generated at build time from the
`SCORES_MAX_STACK_ELEMS` environment variable (default `256`, hard cap
`2048`). Size it to the working set you expect to serve without heap
traffic.
*/

#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(missing_docs))]

include!(concat!(env!("OUT_DIR"), "/consts.rs"));

mod tree;
pub use crate::tree::{NodeView, Score, ScoreError};

mod board;
pub use crate::board::ScoreBoard;

pub mod render;
