use portfolio_fx::text::{StatCounter, Typewriter};

#[test]
fn typewriter_emits_tags_whole() {
    let source = r#"Hi, I'm <span class="highlight">K</span>"#;
    let mut writer = Typewriter::new(source);
    let mut chunks = Vec::new();
    while let Some(chunk) = writer.step() {
        chunks.push(chunk.to_owned());
    }

    assert_eq!(
        chunks,
        ["H", "i", ",", " ", "I", "'", "m", " ", r#"<span class="highlight">"#, "K", "</span>"]
    );
    assert_eq!(writer.shown(), source);
    assert!(writer.is_done());
}

#[test]
fn typewriter_on_empty_text_is_done() {
    let mut writer = Typewriter::new("");
    assert!(writer.is_done());
    assert_eq!(writer.step(), None);
}

#[test]
fn counter_reaches_target_with_suffix() {
    let mut counter = StatCounter::parse("50+").unwrap();
    assert_eq!(counter.target(), 50);

    let mut labels = Vec::new();
    while !counter.is_done() {
        labels.push(counter.step());
        assert!(labels.len() <= 61, "counter did not finish");
    }

    assert_eq!(labels.first().map(String::as_str), Some("1+"));
    assert_eq!(labels.last().map(String::as_str), Some("50+"));
    let values: Vec<u32> = labels
        .iter()
        .map(|l| l.trim_end_matches('+').parse().unwrap())
        .collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn counter_without_suffix() {
    let mut counter = StatCounter::parse(" 3 ").unwrap();
    let mut last = String::new();
    while !counter.is_done() {
        last = counter.step();
    }
    assert_eq!(last, "3");
}
