use newscast_core::*;
use speculate2::speculate;

fn numbered_articles(count: usize) -> Vec<Article> {
    (1..=count)
        .map(|i| Article::new(format!("Headline {}", i), format!("Details {}", i)))
        .collect()
}

speculate! {
    describe "news_digest" {
        describe "render" {
            it "renders one numbered line per article for every size up to the cap" {
                for count in 0..=MAX_ARTICLES {
                    let rendered = NewsDigest::from_articles(numbered_articles(count)).render();
                    let lines: Vec<&str> = rendered.lines().collect();

                    assert_eq!(lines.len(), count);
                    for (i, line) in lines.iter().enumerate() {
                        assert!(line.starts_with(&format!("{}. ", i + 1)));
                    }
                }
            }

            it "keeps the input order" {
                let digest = NewsDigest::from_articles(vec![
                    Article::new("Zebra", "last alphabetically"),
                    Article::new("Alpha", "first alphabetically"),
                ]);

                assert_eq!(
                    digest.render(),
                    "1. Zebra: last alphabetically\n2. Alpha: first alphabetically\n"
                );
            }

            it "leaves an empty trailing segment when the description is missing" {
                let digest = NewsDigest::from_articles(vec![Article {
                    title: Some("Only a title".to_string()),
                    description: None,
                }]);

                assert_eq!(digest.render(), "1. Only a title: \n");
            }

            it "is byte-identical when rendered twice" {
                let digest = NewsDigest::from_articles(vec![
                    Article::new("Élection", "résultats en direct"),
                    Article::new("市场", "股市上涨"),
                ]);

                assert_eq!(digest.render(), digest.render());
                assert_eq!(
                    NewsDigest::from_articles(digest.articles().to_vec()).render(),
                    digest.render()
                );
            }
        }

        describe "from_articles" {
            it "drops everything after the tenth article" {
                let digest = NewsDigest::from_articles(numbered_articles(25));

                assert_eq!(digest.len(), MAX_ARTICLES);
                assert!(digest.render().ends_with("10. Headline 10: Details 10\n"));
            }

            it "is empty for an empty article list" {
                let digest = NewsDigest::from_articles(Vec::new());

                assert!(digest.is_empty());
                assert_eq!(digest.render(), "");
            }
        }
    }

    describe "article" {
        it "deserializes a news API entry and ignores extra fields" {
            let json = r#"{
                "source": {"id": null, "name": "Wire"},
                "title": "Storm hits coast",
                "description": "Thousands without power",
                "url": "https://example.com/storm"
            }"#;

            let article: Article = serde_json::from_str(json).expect("Failed to parse article");

            assert_eq!(article.title(), "Storm hits coast");
            assert_eq!(article.description(), "Thousands without power");
        }

        it "falls back to No Title when the title is absent" {
            let article: Article = serde_json::from_str(r#"{"description": "x"}"#)
                .expect("Failed to parse article");

            assert_eq!(article.title(), "No Title");
        }
    }
}
