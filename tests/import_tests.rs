// tests/import_tests.rs

use std::{
    collections::HashSet,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use quiz_backend::{
    error::AppError,
    importer::{self, ImportDefaults, ImportError, ImportReport},
    models::{
        progress::{ProgressEntry, SubmitAnswerRequest},
        question::{NewQuestion, Question, QuestionFilter},
        topic::{Subtopic, Topic},
    },
    store::{MemoryStore, QuizStore},
};

/// Builds an exam dump the way the scraped pages look: one element per line,
/// with page chrome and scripts around the questions.
fn exam_page(blocks: usize) -> String {
    let mut html = String::from(
        "<html><head><title>Simulado DETRAN</title>\
         <script>window.q = '9) nope';</script></head><body><h1>Simulado</h1>",
    );
    for i in 1..=blocks {
        html.push_str(&format!("<p>{}) Pergunta número {} sobre trânsito?</p>", i, i));
        html.push_str("<p>a) Primeira</p>");
        html.push_str("<p>b) Segunda (x)</p>");
        html.push_str("<p>c) Terceira</p>");
    }
    html.push_str("<footer>Fim do simulado</footer></body></html>");
    html
}

#[tokio::test]
async fn well_formed_document_imports_every_block() {
    let store = MemoryStore::new();

    let report = importer::import_document(&store, &exam_page(25), &ImportDefaults::default()).await;

    assert_eq!(
        report,
        ImportReport { found: 25, imported: 25, skipped: 0, failed: 0 }
    );

    let questions = store.questions().unwrap();
    assert_eq!(questions.len(), 25);
    assert_eq!(questions[0].question_text, "Pergunta número 1 sobre trânsito?");
    assert_eq!(questions[0].options.0, vec!["Primeira", "Segunda", "Terceira", "-"]);
    assert_eq!(questions[0].correct_option, 1);
    assert_eq!(questions[0].topic_id, 1);
    assert!(questions.iter().all(|q| q.subtopic_id.is_none()));
}

#[tokio::test]
async fn malformed_blocks_are_skipped() {
    let html = "<div>1) Só uma opção</div><div>a) única *</div>\
                <div>2) Boa</div><div>a) sim</div><div>b) não *</div>\
                <div>3) Sem opções</div><div>Fim do simulado</div>";
    let store = MemoryStore::new();

    let report = importer::import_document(&store, html, &ImportDefaults::default()).await;

    assert_eq!(report.found, 3);
    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped, 2);

    let questions = store.questions().unwrap();
    assert_eq!(questions[0].question_text, "Boa");
    assert_eq!(questions[0].correct_option, 1);
}

/// Refuses every n-th insert, delegating everything else to a `MemoryStore`.
struct FlakyStore {
    inner: MemoryStore,
    every: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl QuizStore for FlakyStore {
    async fn list_topics(&self) -> Result<Vec<Topic>, AppError> {
        self.inner.list_topics().await
    }

    async fn list_subtopics(&self, topic_id: i64) -> Result<Vec<Subtopic>, AppError> {
        self.inner.list_subtopics(topic_id).await
    }

    async fn list_questions(&self, filter: QuestionFilter) -> Result<Vec<Question>, AppError> {
        self.inner.list_questions(filter).await
    }

    async fn correct_question_ids(&self, user_id: &str) -> Result<HashSet<i64>, AppError> {
        self.inner.correct_question_ids(user_id).await
    }

    async fn progress_entries(&self, user_id: &str) -> Result<Vec<ProgressEntry>, AppError> {
        self.inner.progress_entries(user_id).await
    }

    async fn insert_progress(&self, record: &SubmitAnswerRequest) -> Result<(), AppError> {
        self.inner.insert_progress(record).await
    }

    async fn insert_question(&self, question: &NewQuestion) -> Result<i64, AppError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call % self.every == 0 {
            return Err(AppError::InternalServerError("connection reset".to_string()));
        }
        self.inner.insert_question(question).await
    }
}

#[tokio::test]
async fn failed_inserts_do_not_abort_the_batch() {
    let store = FlakyStore {
        inner: MemoryStore::new(),
        every: 3,
        calls: AtomicUsize::new(0),
    };

    let report = importer::import_document(&store, &exam_page(10), &ImportDefaults::default()).await;

    assert_eq!(report.found, 10);
    assert_eq!(report.failed, 3);
    assert_eq!(report.imported, 7);
    assert_eq!(store.inner.questions().unwrap().len(), 7);
}

#[test]
fn missing_input_file_is_reported() {
    let path = std::env::temp_dir().join(format!("missing-{}.html", uuid::Uuid::new_v4()));

    match importer::read_document(&path) {
        Err(ImportError::MissingFile(reported)) => assert_eq!(reported, path),
        other => panic!("expected MissingFile, got {:?}", other),
    }
}

#[test]
fn input_file_is_read_leniently() {
    let path = std::env::temp_dir().join(format!("dump-{}.html", uuid::Uuid::new_v4()));
    std::fs::write(&path, b"<p>1) Quest\xe3o</p>").unwrap();

    let document = importer::read_document(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(document.starts_with("<p>1) Quest"));
}
