#![no_main]

use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};

use scoreboard::{Score, ScoreBoard, ScoreError};

#[derive(Arbitrary, Debug)]
enum BoardMethod {
    // Small domains force user collisions and value ties
    Add { user: u8, value: i8 },
    Update { user: u8, delta: i8 },
    Top { count: i8 },
    Range { position: i8, count: i8 },
    Len,
}

// Harness Helpers -----------------------------------------------------------------------------------------------------

// Expected enumeration: value descending, ties broken by later insertion.
fn ranked(shadow: &[Score]) -> Vec<Score> {
    let mut indexed: Vec<(usize, Score)> = shadow.iter().cloned().enumerate().collect();
    indexed.sort_by(|a, b| b.1.value.cmp(&a.1.value).then(b.0.cmp(&a.0)));
    indexed.into_iter().map(|(_, s)| s).collect()
}

// Harness -------------------------------------------------------------------------------------------------------------

// Differential fuzzing harness
fuzz_target!(|methods: Vec<BoardMethod>| {
    let board = ScoreBoard::new(); // Structure under test
    let mut shadow: Vec<Score> = Vec::new(); // Reference model, insertion-ordered

    for m in methods {
        match m {
            BoardMethod::Add { user, value } => {
                let s = Score {
                    user: user as i64,
                    value: value as i64,
                };
                let known = shadow.iter().any(|entry| entry.user == s.user);
                match board.add(s) {
                    Ok(()) => {
                        assert!(!known);
                        shadow.push(s);
                    }
                    Err(ScoreError::DuplicateUser) => assert!(known),
                    Err(ScoreError::UnknownUser) => panic!("add returned UnknownUser"),
                }
            }
            BoardMethod::Update { user, delta } => {
                let pos = shadow.iter().position(|entry| entry.user == user as i64);
                match board.update(Score {
                    user: user as i64,
                    value: delta as i64,
                }) {
                    Ok(new_score) => {
                        let pos = pos.expect("update succeeded for unknown user");
                        let old = shadow.remove(pos);
                        assert_eq!(new_score.value, old.value + delta as i64);
                        shadow.push(new_score);
                    }
                    Err(ScoreError::UnknownUser) => assert!(pos.is_none()),
                    Err(ScoreError::DuplicateUser) => panic!("update returned DuplicateUser"),
                }
            }
            BoardMethod::Top { count } => {
                let full = ranked(&shadow);
                let take = if count <= 0 {
                    0
                } else {
                    (count as usize).min(full.len())
                };
                assert_eq!(board.top(count as i64), full[..take].to_vec());
            }
            BoardMethod::Range { position, count } => {
                let full = ranked(&shadow);
                let (position, count) = (position as i64, count as i64);
                let lo = (position - count).max(1) - 1;
                let hi = (position + count).min(full.len() as i64).max(0);
                let expected: Vec<Score> = if lo < hi {
                    full[lo as usize..hi as usize].to_vec()
                } else {
                    Vec::new()
                };
                assert_eq!(board.range(position, count), expected);
            }
            BoardMethod::Len => assert_eq!(board.len(), shadow.len()),
        }
    }
});
