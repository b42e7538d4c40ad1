use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::http::DocumentSource;
use crate::io::{append_lines, parse_protocol, read_records};
use crate::models::PoliticianName;

/// Configuration for speech crawling
#[derive(Debug, Clone)]
pub struct SpeechCrawlConfig {
    /// Link list produced by link collection
    pub links_path: PathBuf,
    /// Per-person speech collection, appended to
    pub output_path: PathBuf,
}

/// Result of speech crawling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechCrawlResult {
    pub documents_fetched: usize,
    pub speeches_found: usize,
}

/// Fetch every linked protocol and append the politician's speech text
///
/// One line is appended per document in which the politician spoke; it holds
/// all their fragments from that document. Any fetch or parse failure aborts
/// the run, leaving lines already written in place.
pub async fn execute_speech_crawl<S: DocumentSource>(
    source: &S,
    politician: &PoliticianName,
    config: &SpeechCrawlConfig,
) -> Result<SpeechCrawlResult> {
    let links = read_records(&config.links_path).context("Failed to read link list")?;

    info!(
        "Crawling {} protocols for speeches by {}",
        links.len(),
        politician
    );

    let mut documents_fetched = 0;
    let mut speeches_found = 0;

    for link in &links {
        let url = document_url(link);
        let xml = source.fetch_document(&url).await?;
        documents_fetched += 1;

        let protocol =
            parse_protocol(&xml).with_context(|| format!("Failed to parse protocol at {url}"))?;

        match protocol.collect_speech(politician) {
            Some(speech) => {
                debug!("{}: {} characters", url, speech.chars().count());
                append_lines(&config.output_path, &[speech])?;
                speeches_found += 1;
            }
            None => debug!("{}: no speech", url),
        }
    }

    info!(
        "Found speeches in {} of {} protocols",
        speeches_found, documents_fetched
    );

    Ok(SpeechCrawlResult {
        documents_fetched,
        speeches_found,
    })
}

/// Link lists may hold scheme-less entries such as `bundestag.de/resource/...`
fn document_url(link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{link}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    fn protocol_xml(first: &str, last: &str, text: &str) -> String {
        format!(
            r#"<dbtplenarprotokoll><sitzungsverlauf><tagesordnungspunkt top-id="TOP 1">
              <rede id="R1">
                <p klasse="redner"><redner><name><vorname>{first}</vorname><nachname>{last}</nachname></name></redner>{first} {last}:</p>
                <p klasse="J_1">Anrede</p>
                <p klasse="O">{text}</p>
                <p klasse="J">Schluss.</p>
              </rede>
            </tagesordnungspunkt></sitzungsverlauf></dbtplenarprotokoll>"#
        )
    }

    struct FakeDocuments {
        documents: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeDocuments {
        fn new(documents: &[(&str, String)]) -> Self {
            Self {
                documents: documents
                    .iter()
                    .map(|(url, xml)| (url.to_string(), xml.clone()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl DocumentSource for FakeDocuments {
        async fn fetch_document(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.documents
                .get(url)
                .cloned()
                .with_context(|| format!("HTTP error for {url}: 404 Not Found"))
        }
    }

    fn setup(links: &str) -> (tempfile::TempDir, SpeechCrawlConfig) {
        let dir = tempfile::tempdir().unwrap();
        let links_path = dir.path().join("links.txt");
        std::fs::write(&links_path, links).unwrap();
        let config = SpeechCrawlConfig {
            links_path,
            output_path: dir.path().join("doe").join("speech_collection.txt"),
        };
        (dir, config)
    }

    #[test]
    fn test_document_url() {
        assert_eq!(
            document_url("bundestag.de/resource/blob/1.xml"),
            "https://bundestag.de/resource/blob/1.xml"
        );
        assert_eq!(document_url("https://x.de/1.xml"), "https://x.de/1.xml");
    }

    #[tokio::test]
    async fn test_appends_one_line_per_matching_document() {
        let source = FakeDocuments::new(&[
            ("https://x.de/1.xml", protocol_xml("Jane", "Doe", "Erste Rede.")),
            ("https://x.de/2.xml", protocol_xml("John", "Roe", "Fremde Rede.")),
            ("https://x.de/3.xml", protocol_xml("Jane", "Doe", "Zweite Rede.")),
        ]);
        let (_dir, config) = setup("x.de/1.xml\nhttps://x.de/2.xml\n\nx.de/3.xml\n");
        let name = PoliticianName::parse("jane doe").unwrap();

        let result = execute_speech_crawl(&source, &name, &config).await.unwrap();

        assert_eq!(
            result,
            SpeechCrawlResult {
                documents_fetched: 3,
                speeches_found: 2
            }
        );
        assert_eq!(
            std::fs::read_to_string(&config.output_path).unwrap(),
            "Erste Rede. Schluss.\nZweite Rede. Schluss.\n"
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_remaining_links() {
        let source = FakeDocuments::new(&[
            ("https://x.de/1.xml", protocol_xml("Jane", "Doe", "Erste Rede.")),
            ("https://x.de/3.xml", protocol_xml("Jane", "Doe", "Zweite Rede.")),
        ]);
        let (_dir, config) = setup("x.de/1.xml\nx.de/missing.xml\nx.de/3.xml\n");
        let name = PoliticianName::parse("Jane Doe").unwrap();

        let err = execute_speech_crawl(&source, &name, &config)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));

        assert_eq!(source.requested.lock().unwrap().len(), 2);
        assert_eq!(
            std::fs::read_to_string(&config.output_path).unwrap(),
            "Erste Rede. Schluss.\n"
        );
    }

    #[tokio::test]
    async fn test_malformed_document_aborts() {
        let source = FakeDocuments::new(&[(
            "https://x.de/1.xml",
            "<dbtplenarprotokoll/>".to_string(),
        )]);
        let (_dir, config) = setup("x.de/1.xml\n");
        let name = PoliticianName::parse("Jane Doe").unwrap();

        let err = execute_speech_crawl(&source, &name, &config)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse protocol"));
        assert!(!config.output_path.exists());
    }

    #[tokio::test]
    async fn test_missing_link_list() {
        let source = FakeDocuments::new(&[]);
        let dir = tempfile::tempdir().unwrap();
        let config = SpeechCrawlConfig {
            links_path: dir.path().join("missing.txt"),
            output_path: dir.path().join("out.txt"),
        };
        let name = PoliticianName::parse("Jane Doe").unwrap();

        assert!(execute_speech_crawl(&source, &name, &config).await.is_err());
    }
}
