use art_school_ai::oracle::{rank_single, GeminiOracle, ImageInput};
use art_school_common::{extract_school_with_fallback, Lexicon};
use std::time::Duration;

#[tokio::test]
async fn gemini_rank_integration() {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return;
        }
    };

    let img = image::RgbImage::from_fn(64, 64, |x, y| image::Rgb([(x * 4) as u8, (y * 4) as u8, 128]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("png encode failed");
    let image = ImageInput::new(bytes, "image/png");

    let oracle = GeminiOracle::new(api_key, "gemini-1.5-flash", Duration::from_secs(60))
        .expect("client build failed");
    let text = rank_single(&oracle, &image, Duration::from_secs(60))
        .await
        .expect("gemini request failed");

    assert!(!text.trim().is_empty());
    // 순위 응답은 항상 사조 하나로 해석된다
    let lexicon = Lexicon::builtin();
    let school = extract_school_with_fallback(&text, &lexicon);
    assert!(lexicon.schools().any(|s| s == school));
}
