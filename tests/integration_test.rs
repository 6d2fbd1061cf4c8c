//! Integration tests for smartchunk.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use smartchunk::analysis::sentence_bodies;
use smartchunk::chunking::{ChunkingOptions, smart_chunk, smart_chunk_async};
use smartchunk::core::{DocumentType, Language};
use smartchunk::detect_language;

/// Characters of the original text covered by a chunk's primary content.
fn primary_of(text: &str, chunk: &smartchunk::Chunk) -> String {
    text.chars()
        .skip(chunk.metadata.start_offset)
        .take(chunk.metadata.end_offset - chunk.metadata.start_offset)
        .collect()
}

#[test]
fn test_header_only_input_is_dropped() {
    let chunks = smart_chunk("## Title\n\n## Another", &ChunkingOptions::default());
    assert!(chunks.is_empty());
}

#[test]
fn test_setext_headers_only_input_is_dropped() {
    let text = "Installation And Configuration Guide\n====================================\n\n\
                Getting Started With The Service\n--------------------------------";
    assert!(smartchunk::analyze_structure(text).has_headers);
    assert!(smart_chunk(text, &ChunkingOptions::default()).is_empty());
}

#[test]
fn test_header_survives_oversized_first_sentence() {
    let text = format!(
        "## 설치 가이드 상세 안내\n\n{}입니다. 두 번째 문장입니다.",
        "가".repeat(495)
    );
    let options = ChunkingOptions::new().max_chunk_size(500).overlap(0);
    let chunks = smart_chunk(&text, &options);
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].content.starts_with("## 설치 가이드 상세 안내"));
    assert!(chunks[0].metadata.has_header);
    assert!(!chunks[0].metadata.has_overlap);
}

#[test]
fn test_faq_header_and_question_survive_long_answer() {
    let text = format!(
        "# 자주 묻는 질문 안내 페이지\n\nQ: 환불은 가능한가요?\nA: {}입니다.",
        "답".repeat(405)
    );
    let options = ChunkingOptions::new().max_chunk_size(420).overlap(0);
    let chunks = smart_chunk(&text, &options);
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].content.starts_with("# 자주 묻는 질문 안내 페이지"));
    assert!(chunks[0].content.contains("Q: 환불은 가능한가요?"));
    assert!(chunks[0].metadata.has_header);
    assert!(chunks[0].metadata.is_qa_pair);
}

#[test]
fn test_repeated_greeting_respects_bound() {
    let text = "안녕하세요. ".repeat(200);
    let chunks = smart_chunk(&text, &ChunkingOptions::new().max_chunk_size(500));
    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.size() <= 550, "chunk {} has {} chars", chunk.index, chunk.size());
    }
    for pair in chunks.windows(2) {
        assert!(pair[1].metadata.has_overlap);
        let prefix_len = pair[1].size() - (pair[1].metadata.end_offset - pair[1].metadata.start_offset);
        let prefix: String = pair[1].content.chars().take(prefix_len).collect();
        assert!(pair[0].content.ends_with(prefix.trim_end()));
    }
}

#[test]
fn test_qa_pair_stays_together() {
    let text = "Q: 질문입니다 충분히 길게.\nA: 답변입니다 충분히 길게.";
    let chunks = smart_chunk(text, &ChunkingOptions::new().preserve_structure(true));
    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].content.contains("Q:"));
    assert!(chunks[0].content.contains("A:"));
    assert!(chunks[0].metadata.is_qa_pair);
}

#[test]
fn test_balanced_scripts_are_mixed() {
    assert_eq!(detect_language("Hello 안녕 World 세계"), Language::Mixed);
}

#[test]
fn test_no_sentence_opens_with_lone_particle() {
    let text = "설명을 마칩니다 를 포함한 목록입니다 은 예외로 둡니다. 다음 단계로 넘어갑니다";
    for body in sentence_bodies(text) {
        let mut words = body.split_whitespace();
        let first = words.next().unwrap_or_default();
        assert!(
            !["을", "를", "이", "가", "은", "는"].contains(&first),
            "sentence opens with particle: {body}"
        );
    }
    assert_eq!(sentence_bodies(text).len(), 2);
}

#[test]
fn test_short_text_is_dropped() {
    assert!(smart_chunk("짧은 텍스트", &ChunkingOptions::default()).is_empty());
}

#[test]
fn test_auto_detected_faq_sizing() {
    let text = "Q: 배송은 얼마나 걸리나요?\nA: 주문 후 영업일 기준으로 보통 3일 정도 걸립니다.\n\n\
                Q: 교환이나 환불은 가능한가요?\nA: 상품을 받은 날로부터 7일 이내라면 가능합니다.\n\n\
                Q: 해외 배송도 하나요?\nA: 현재는 국내 배송만 지원하고 있습니다.";
    let chunks = smart_chunk(text, &ChunkingOptions::new().auto_detect_document_type(true));
    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert_eq!(chunk.metadata.document_type, Some(DocumentType::Faq));
        assert!(chunk.size() <= 400 + 50);
    }
}

#[test]
fn test_explicit_size_overrides_detection() {
    let text = "Q: 배송은 얼마나 걸리나요?\nA: 보통 3일 걸립니다.\n\n\
                Q: 환불은 되나요?\nA: 7일 이내라면 가능합니다.";
    let options = ChunkingOptions::new()
        .auto_detect_document_type(true)
        .max_chunk_size(2000);
    let chunks = smart_chunk(text, &options);
    assert!(chunks.iter().all(|c| c.metadata.document_type == Some(DocumentType::Faq)));
}

#[test]
fn test_complete_pair_outscores_question_only() {
    let options = ChunkingOptions::default();
    let pair = smart_chunk("Q: 비밀번호는 어떻게 바꾸나요?\nA: 설정 화면에서 바꿀 수 있습니다.", &options);
    let question = smart_chunk("Q: 비밀번호는 어떻게 바꾸나요?\n설정 화면에서 바꿀 수 있습니다.", &options);
    assert_eq!(pair.len(), 1);
    assert_eq!(question.len(), 1);
    assert!(pair[0].quality_score > question[0].quality_score);
}

#[test]
fn test_json_shape() {
    let text = "# 안내\n\n서비스는 오늘부터 시작합니다. 문의는 이메일로 보내 주세요.";
    let chunks = smart_chunk(text, &ChunkingOptions::default());
    let json = serde_json::to_value(&chunks).unwrap();
    let first = &json[0];
    assert_eq!(first["index"], 0);
    assert!(first["qualityScore"].is_u64());
    let meta = &first["metadata"];
    for key in [
        "startOffset",
        "endOffset",
        "isQAPair",
        "hasHeader",
        "isTable",
        "isList",
        "language",
        "readabilityScore",
        "sentenceCount",
        "avgSentenceLength",
        "hasOverlap",
        "autoApprovable",
    ] {
        assert!(meta.get(key).is_some(), "missing {key}");
    }
    assert!(meta.get("documentType").is_none());
    assert_eq!(meta["language"], "ko");
}

#[tokio::test]
async fn test_async_entry_point_matches_sync() {
    let text = "The service starts today. Support is available by email.\n\n\
                서비스는 오늘부터 시작합니다. 문의는 이메일로 보내 주세요.";
    let options = ChunkingOptions::default();
    let chunks = smart_chunk_async(text, &options).await;
    assert_eq!(chunks, smart_chunk(text, &options));
    assert_eq!(chunks.len(), 2);
}

mod property_tests {
    use super::primary_of;
    use proptest::prelude::*;
    use smartchunk::chunking::{ChunkingOptions, smart_chunk};
    use smartchunk::scoring::quality::meaningful_chars;
    use smartchunk::{calculate_readability_score, detect_language};

    /// Document fragments that each end a sentence, so no sentence can
    /// outgrow the smallest size under test.
    fn fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("안녕하세요. ".to_string()),
            Just("The weather is nice today. ".to_string()),
            Just("\n\n".to_string()),
            Just("## 제목\n".to_string()),
            Just("Q: 질문인가요?\n".to_string()),
            Just("A: 네, 맞습니다.\n".to_string()),
            Just("- 목록 항목입니다.\n".to_string()),
            Just("---\n".to_string()),
            "[가-힣]{2,20}".prop_map(|word| format!("{word}. ")),
        ]
    }

    fn document() -> impl Strategy<Value = String> {
        prop::collection::vec(fragment(), 0..80).prop_map(|parts| parts.concat())
    }

    fn header_or_separator_line() -> impl Strategy<Value = String> {
        prop_oneof![
            "#{1,6} [a-zA-Z가-힣 ]{0,20}",
            "-{3,10}",
            "\\*{3,10}",
            "_{3,10}",
            "={3,10}",
            "[a-zA-Z가-힣 ]{1,30}\n={3,10}",
            "[a-zA-Z가-힣 ]{1,30}\n-{3,10}",
            Just(String::new()),
        ]
    }

    proptest! {
        #[test]
        fn indices_are_dense(text in document(), max in 100usize..600, overlap in 0usize..80) {
            let options = ChunkingOptions::new().max_chunk_size(max).overlap(overlap);
            let chunks = smart_chunk(&text, &options);
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.index, i);
            }
        }

        #[test]
        fn chunks_respect_size_bound(text in document(), max in 100usize..600, overlap in 0usize..50) {
            let options = ChunkingOptions::new().max_chunk_size(max).overlap(overlap);
            for chunk in smart_chunk(&text, &options) {
                let primary = primary_of(&text, &chunk);
                let span = chunk.metadata.end_offset - chunk.metadata.start_offset;
                prop_assert!(chunk.content.ends_with(&primary));
                // only header lines in front of a sentence may push past the bound
                prop_assert!(span <= max || meaningful_chars(&primary) < max);
                prop_assert!(chunk.size() <= span + overlap);
            }
        }

        #[test]
        fn overlap_is_exact(text in document(), max in 100usize..300, overlap in 1usize..50) {
            let options = ChunkingOptions::new().max_chunk_size(max).overlap(overlap);
            let chunks = smart_chunk(&text, &options);
            let chars: Vec<char> = text.chars().collect();
            for pair in chunks.windows(2) {
                let meta = &pair[1].metadata;
                if !meta.has_overlap {
                    continue;
                }
                let prefix_len = pair[1].size() - (meta.end_offset - meta.start_offset);
                let prefix_start = meta.start_offset - prefix_len;
                let prefix: String = chars[prefix_start..meta.start_offset].iter().collect();
                prop_assert!(pair[1].content.starts_with(&prefix));
                prop_assert!(prefix_len <= overlap);

                // the previous chunk of the same unit may have been dropped
                if pair[0].metadata.end_offset < prefix_start {
                    continue;
                }
                let shared = prefix.trim_end();
                prop_assert!(!shared.is_empty());
                prop_assert!(pair[0].content.ends_with(shared));
            }
        }

        #[test]
        fn chunking_never_panics(text in any::<String>()) {
            let chunks = smart_chunk(&text, &ChunkingOptions::default());
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.index, i);
                prop_assert!(chunk.quality_score <= 100);
            }
        }

        #[test]
        fn readability_in_bounds(text in any::<String>()) {
            prop_assert!(calculate_readability_score(&text) <= 100);
        }

        #[test]
        fn readability_of_whitespace_is_zero(text in "[ \t\n\r]{0,40}") {
            prop_assert_eq!(calculate_readability_score(&text), 0);
        }

        #[test]
        fn language_detection_is_deterministic(text in any::<String>()) {
            prop_assert_eq!(detect_language(&text), detect_language(&text));
        }

        #[test]
        fn headers_and_separators_yield_nothing(
            lines in prop::collection::vec(header_or_separator_line(), 0..30)
        ) {
            let text = lines.join("\n");
            prop_assert!(smart_chunk(&text, &ChunkingOptions::default()).is_empty());
        }
    }
}

/// Binary integration tests.
mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FAQ: &str = "Q: 배송은 얼마나 걸리나요?\nA: 주문 후 영업일 기준으로 보통 3일 정도 걸립니다.\n\n\
                       Q: 교환이나 환불은 가능한가요?\nA: 상품을 받은 날로부터 7일 이내라면 가능합니다.";

    fn smartchunk() -> Command {
        let mut cmd = Command::cargo_bin("smartchunk").expect("binary builds");
        cmd.env_remove("SMARTCHUNK_MAX_CHUNK_SIZE")
            .env_remove("SMARTCHUNK_OVERLAP")
            .env_remove("RUST_LOG");
        cmd
    }

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_chunk_text_output() {
        let file = temp_file(FAQ);
        smartchunk()
            .arg("chunk")
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Chunks:         2"));
    }

    #[test]
    fn test_chunk_json_output() {
        let file = temp_file(FAQ);
        let output = smartchunk()
            .args(["chunk", "--auto-detect", "--format", "json"])
            .arg(file.path())
            .output()
            .expect("run binary");
        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
        assert_eq!(json["report"]["documentType"], "faq");
        assert_eq!(json["chunks"][1]["index"], 1);
        assert_eq!(json["chunks"][0]["metadata"]["documentType"], "faq");
    }

    #[test]
    fn test_chunk_from_stdin() {
        smartchunk()
            .args(["chunk", "-", "--format", "json"])
            .write_stdin("The service starts today. Support is available by email.")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"source\": \"-\""));
    }

    #[test]
    fn test_env_sets_chunk_size() {
        let text: Vec<String> = (0..20).map(|i| format!("Sentence{i}.")).collect();
        let file = temp_file(&text.join(" "));
        let output = smartchunk()
            .env("SMARTCHUNK_MAX_CHUNK_SIZE", "60")
            .env("SMARTCHUNK_OVERLAP", "0")
            .args(["chunk", "--format", "json"])
            .arg(file.path())
            .output()
            .expect("run binary");
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
        assert_eq!(json["chunks"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_analyze() {
        let file = temp_file(FAQ);
        smartchunk()
            .arg("analyze")
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Document type:  faq"))
            .stdout(predicate::str::contains("Language:       ko"));
    }

    #[test]
    fn test_readability() {
        smartchunk()
            .args(["readability", "-"])
            .write_stdin("서비스를 시작합니다. 곧 안내드리겠습니다.")
            .assert()
            .success()
            .stdout(predicate::str::contains("readability"));
    }

    #[test]
    fn test_missing_file_fails() {
        smartchunk()
            .args(["chunk", "/nonexistent/smartchunk/input.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("file not found"));
    }

    #[test]
    fn test_missing_file_json_error_on_stdout() {
        smartchunk()
            .args(["chunk", "/nonexistent/smartchunk/input.txt", "--format", "json"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("\"error\""));
    }

    #[test]
    fn test_verbose_logs_to_stderr() {
        let file = temp_file(FAQ);
        smartchunk()
            .args(["chunk", "--verbose"])
            .arg(file.path())
            .assert()
            .success()
            .stderr(predicate::str::contains("chunking complete"));
    }
}
