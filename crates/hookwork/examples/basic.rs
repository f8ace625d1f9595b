//! Example: Basic usage of hookwork

use hookwork::{CommandEnvelope, Config, Engine};
use tracing_subscriber::EnvFilter;

const MARKUP: &str = r#"
<!DOCTYPE html>
<html>
<body>
    <div id="hero" data-is="carousel" data-autoplay data-delay="3000" data-id="hero">
        <div data-hook-carousel="item">Spring</div>
        <div data-hook-carousel="item">Summer</div>
        <div data-hook-carousel="item">Autumn</div>
        <button data-hook-carousel="previous">Previous</button>
        <button id="next" data-hook-carousel="next">Next</button>
        <button data-hook-carousel="play">Play</button>
        <button data-hook-carousel="pause">Pause</button>
    </div>
    <div id="faq" data-is="accordion" data-single-expansion>
        <div data-hook-accordion="item">
            <button data-hook-accordion="button">What is this?</button>
            <div data-hook-accordion="panel">A widget engine.</div>
        </div>
        <div data-hook-accordion="item">
            <button id="faq-2" data-hook-accordion="button">How does it start?</button>
            <div data-hook-accordion="panel">It scans for data-is markers.</div>
        </div>
    </div>
</body>
</html>
"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    
    let config = Config { editor_channel: true, ..Config::default() };
    let engine = Engine::new(config);
    let mut page = engine.load_html(MARKUP)?;
    println!("hookwork v{} mounted {} widgets", hookwork::VERSION, page.widget_count());
    
    let hero = page.element("hero")?;
    let faq = page.element("faq")?;
    
    page.advance(3_000)?;
    println!("after 3s: slide {:?}", page.carousel(hero).and_then(|c| c.active_index()));
    
    let next = page.element("next")?;
    page.click(next)?;
    println!("after next: slide {:?}", page.carousel(hero).and_then(|c| c.active_index()));
    
    let question = page.element("faq-2")?;
    page.press(question, "Enter")?;
    println!("faq open: {:?}", page.accordion(faq).map(|a| a.expanded()));
    
    page.post_message(&CommandEnvelope::navigate("carousel", "hero", 0).to_json())?;
    println!("after editor command: slide {:?}", page.carousel(hero).and_then(|c| c.active_index()));
    
    Ok(())
}
