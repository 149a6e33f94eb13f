//! Prints the ascii and DOT renderings of a small demo board.
//!
//! Run with `cargo run --example render_tree`.

use scoreboard::render::ascii::{AsciiTree, Config};
use scoreboard::render::dot;
use scoreboard::{Score, ScoreBoard};

fn main() {
    let board = ScoreBoard::new();
    for (user, value) in &[(1, 50), (2, 30), (3, 70), (4, 40), (5, 90)] {
        board
            .add(Score {
                user: *user,
                value: *value,
            })
            .expect("demo users are unique");
    }
    board
        .update(Score { user: 2, value: 45 })
        .expect("user 2 was added above");

    let drawing = board.with_view(|view| {
        let mut ascii = AsciiTree::new(Config {
            node_width: 6,
            node_height: 1,
            edge_height: 3,
            distance: 2,
            sep: 2,
        });
        ascii.from_view(view);
        ascii.draw()
    });
    println!("{}", String::from_utf8_lossy(&drawing));

    println!("{}", board.with_view(dot::graph));
}
