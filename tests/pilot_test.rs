mod common;
use common::*;
use unibasic::mach::Val;

#[test]
fn test_yes_false_suppresses_next_type_only() {
    let (mut r, c) = runtime();
    let out = program(&mut r, &c, &["10 Y: 1 = 2", "20 T:hello", "30 T:world"]);
    assert_eq!(out, "world\n");
}

#[test]
fn test_no_sets_flag_to_condition() {
    let (mut r, _c) = runtime();
    r.enter("N: 1 = 1");
    assert!(r.flow().matched());
    r.enter("N: 0");
    assert!(!r.flow().matched());
}

#[test]
fn test_conditioned_type() {
    let (mut r, c) = runtime();
    let out = program(
        &mut r,
        &c,
        &[
            "10 Y: 2 > 1",
            "20 TY:matched",
            "30 TN:not matched",
            "40 T(2 > 3):never",
            "50 T(2 < 3):always",
        ],
    );
    assert_eq!(out, "matched\nalways\n");
}

#[test]
fn test_accept_and_match_text() {
    let (mut r, c) = runtime();
    answers(&mut r, &["I like Blue skies"]);
    let out = program(
        &mut r,
        &c,
        &[
            "10 T:Favourite colour?",
            "20 A:",
            "30 MT:red,blue,green",
            "40 TY:You said $ANSWER, option *RESULT*",
            "50 TN:No match",
        ],
    );
    assert_eq!(out, "Favourite colour?\nYou said I like Blue skies, option 2\n");
}

#[test]
fn test_accept_into_named_variable() {
    let (mut r, c) = runtime();
    answers(&mut r, &["12", "Grace"]);
    r.enter("A: AGE");
    r.enter("A: NAME$");
    r.enter("T:$NAME$ is $AGE");
    assert_eq!(exec(&mut r, &c), "Grace is 12\n");
    assert_eq!(r.var().get("AGE"), Some(&Val::Integer(12)));
}

#[test]
fn test_accept_trims_every_target() {
    let (mut r, c) = runtime();
    answers(&mut r, &[" bob "]);
    r.enter("A: NM");
    assert_eq!(exec(&mut r, &c), "");
    assert_eq!(r.var().get("NM"), Some(&Val::String("bob".into())));
    assert_eq!(r.var().get("ANSWER"), Some(&Val::String("bob".into())));
}

#[test]
fn test_interpolation_leaves_unknown_names() {
    let (mut r, c) = runtime();
    r.enter("T:cost $PRICE or *TOTAL*");
    assert_eq!(exec(&mut r, &c), "cost $PRICE or *TOTAL*\n");
}

#[test]
fn test_match_jump() {
    let (mut r, c) = runtime();
    let out = program(
        &mut r,
        &c,
        &[
            "10 Y: 1",
            "20 M: DONE",
            "30 T:skipped",
            "40 L: DONE",
            "50 T:done",
        ],
    );
    assert_eq!(out, "done\n");
}

#[test]
fn test_jump_to_label_and_conditional_jump() {
    let (mut r, c) = runtime();
    let out = program(
        &mut r,
        &c,
        &[
            "10 C: N = 0",
            "20 L: LOOP",
            "30 C: N = N + 1",
            "40 J(N < 3): LOOP",
            "50 T:N is $N",
            "60 E:",
            "70 T:after end",
        ],
    );
    assert_eq!(out, "N is 3\n");
}

#[test]
fn test_undefined_label() {
    let (mut r, c) = runtime();
    let out = program(&mut r, &c, &["10 J: NOWHERE", "20 T:next"]);
    assert_eq!(out, "?Undefined label in 10; NOWHERE\nnext\n");
}

#[test]
fn test_use_and_compute_return() {
    let (mut r, c) = runtime();
    let out = program(
        &mut r,
        &c,
        &[
            "10 U: GREET",
            "20 T:back",
            "30 E:",
            "40 L: GREET",
            "50 T:hi",
            "60 C:",
        ],
    );
    assert_eq!(out, "hi\nback\n");
}

#[test]
fn test_use_assignment() {
    let (mut r, c) = runtime();
    r.enter("U: X = 3 * 3");
    assert_eq!(exec(&mut r, &c), "");
    assert_eq!(r.var().get("X"), Some(&Val::Integer(9)));
}

#[test]
fn test_compute_expression_to_result() {
    let (mut r, c) = runtime();
    r.enter("C: 2 + 3");
    r.enter("MATH: RESULT * 10");
    assert_eq!(r.var().get("RESULT"), Some(&Val::Integer(50)));
    assert_eq!(exec(&mut r, &c), "");
}

#[test]
fn test_runtime_vars() {
    let (mut r, c) = runtime();
    r.enter("B = 2");
    r.enter("A$ = \"x\"");
    r.enter("R: VARS");
    assert_eq!(exec(&mut r, &c), "A$ = x\nB = 2\n");
    r.enter("R: CLEAR");
    assert!(r.var().is_empty());
}

#[test]
fn test_database() {
    let (mut r, c) = runtime();
    r.enter("D: SET name, \"Ada\"");
    r.enter("D: SET age, 36");
    r.enter("D: GET name, WHO$");
    r.enter("D: COUNT");
    r.enter("T:$WHO$ *RESULT*");
    assert_eq!(exec(&mut r, &c), "Ada 2\n");
    r.enter("D: GET missing, M$");
    assert_eq!(r.var().get("M$"), Some(&Val::String(String::new())));
}

#[test]
fn test_string_ops() {
    let (mut r, c) = runtime();
    r.enter("W$ = \"  Hello \"");
    r.enter("S: TRIM W$");
    r.enter("S: REVERSE W$");
    r.enter("S: UPPER W$");
    r.enter("T:$W$");
    r.enter("S: LEN W$");
    assert_eq!(exec(&mut r, &c), "OLLEH\n");
    assert_eq!(r.var().get("RESULT"), Some(&Val::Integer(5)));
}

#[test]
fn test_datetime_year() {
    let (mut r, c) = runtime();
    r.enter("DT: YEAR Y");
    assert_eq!(exec(&mut r, &c), "");
    match r.var().get("Y") {
        Some(Val::Integer(year)) => assert!(*year >= 2024),
        other => panic!("{:?}", other),
    }
}

#[test]
fn test_game_dice_and_score() {
    let (mut r, c) = runtime();
    for _ in 0..20 {
        r.enter("GAME: DICE 4");
        match r.var().get("RESULT") {
            Some(Val::Integer(n)) => assert!((1..=4).contains(n)),
            other => panic!("{:?}", other),
        }
    }
    r.enter("GAME: SCORE 10");
    r.enter("GAME: SCORE 5");
    assert_eq!(r.var().get("SCORE"), Some(&Val::Integer(15)));
    r.enter("GAME: RESET");
    assert_eq!(r.var().get("SCORE"), Some(&Val::Integer(0)));
    r.enter("GAME: DICE 0");
    assert_eq!(exec(&mut r, &c), "?Illegal function call; DICE NEEDS A SIDE\n");
}

#[test]
fn test_seeded_dice_repeat() {
    let rolls = || {
        let (mut r, _c) = runtime();
        (0..10)
            .map(|_| {
                r.enter("GAME: DICE");
                r.var().get("RESULT").cloned()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(rolls(), rolls());
}

#[test]
fn test_branch() {
    let (mut r, c) = runtime();
    let out = program(
        &mut r,
        &c,
        &[
            "10 X = 5",
            "20 BRANCH: X > 3, BIG, SMALL",
            "30 L: SMALL",
            "40 T:small",
            "50 E:",
            "60 L: BIG",
            "70 T:big",
        ],
    );
    assert_eq!(out, "big\n");
}

#[test]
fn test_audio() {
    use unibasic::mach::sink::Sound;
    let (mut r, c) = runtime();
    r.enter("AUDIO: BEEP");
    r.enter("AUDIO: TONE 440, 250");
    assert_eq!(
        c.take_sounds(),
        vec![
            Sound::Beep,
            Sound::Tone {
                frequency: 440.0,
                millis: 250
            }
        ]
    );
}

#[test]
fn test_audio_play() {
    use unibasic::mach::sink::Sound;
    let (mut r, c) = runtime();
    r.enter(r#"AUDIO: PLAY "chime.wav""#);
    assert_eq!(exec(&mut r, &c), "");
    assert_eq!(c.take_sounds(), vec![Sound::Play("chime.wav".into())]);
}

#[test]
fn test_multimedia() {
    use unibasic::mach::sink::Graphic;
    let (mut r, c) = runtime();
    r.enter(r#"MULTIMEDIA: SHOW "map.png""#);
    r.enter("MULTIMEDIA: play intro.mp4");
    let media: Vec<Graphic> = c
        .take_graphics()
        .into_iter()
        .filter(|g| matches!(g, Graphic::Media { .. }))
        .collect();
    assert_eq!(
        media,
        vec![
            Graphic::Media {
                action: "SHOW".into(),
                path: "map.png".into()
            },
            Graphic::Media {
                action: "PLAY".into(),
                path: "intro.mp4".into()
            },
        ]
    );
}

#[test]
fn test_game_shuffle() {
    let shuffled = || {
        let (mut r, c) = runtime();
        r.enter("DECK = [1, 2, 3, 4, 5, 6, 7, 8]");
        r.enter("GAME: SHUFFLE DECK");
        assert_eq!(exec(&mut r, &c), "");
        r.var().get("DECK").map(|deck| deck.to_string())
    };
    let deck = shuffled().unwrap();
    assert_eq!(shuffled().unwrap(), deck);
    let mut cards: Vec<&str> = deck
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(", ")
        .collect();
    cards.sort_unstable();
    assert_eq!(cards, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);

    let (mut r, c) = runtime();
    r.enter("GAME: SHUFFLE NOPE");
    assert_eq!(exec(&mut r, &c), "?Unknown identifier; NOPE\n");
}

#[test]
fn test_web_bad_url() {
    let (mut r, c) = runtime();
    r.enter("W:GET notaurl, PAGE$");
    assert!(exec(&mut r, &c).starts_with("?Network error; "));
    assert_eq!(r.var().get("PAGE$"), None);
    assert_eq!(r.var().get("EOF"), Some(&Val::Integer(1)));
    r.enter("W:POST x");
    assert_eq!(exec(&mut r, &c), "?Syntax error; UNKNOWN W: OPERATION POST\n");
}
