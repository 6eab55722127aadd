//! Results-page fixtures shared by the integration tests.

// Not every test binary uses every fixture.
#![allow(dead_code)]

/// A results page in the shape the structured pass expects: six organic
/// results, engine navigation links and one duplicated link.
pub const RESULTS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>rust - Google Search</title></head>
<body>
  <div id="gb">
    <a href="https://accounts.google.com/ServiceLogin?continue=https://www.google.com/">Sign in</a>
    <a href="/search?q=rust&amp;tbm=isch">Images</a>
  </div>
  <div id="search">
    <div class="g"><div><div>
      <a href="/url?q=https://www.rust-lang.org/&amp;sa=U&amp;ved=2ahUKE"><h3 class="LC20lb"><span>Rust</span> Programming Language</h3></a>
      <div class="VwiC3b yXK7lf">A language empowering <em>everyone</em> to build reliable and efficient software.</div>
    </div></div></div>
    <div class="g"><div><div>
      <a href="https://doc.rust-lang.org/book/"><h3>The Rust Programming Language - The Rust Book</h3></a>
      <a href="https://doc.rust-lang.org/book/">Cached</a>
      <div class="VwiC3b">by S Klabnik &middot; An introductory book about Rust.</div>
    </div></div></div>
    <div class="g"><div><div>
      <a href="/url?q=https://en.wikipedia.org/wiki/Rust_(programming_language)&amp;sa=U"><h3>Rust (programming language) - Wikipedia</h3></a>
      <div class="VwiC3b">Rust is a general-purpose programming language emphasizing <b>performance</b>.</div>
    </div></div></div>
    <div class="g"><div><div>
      <a href="https://github.com/rust-lang/rust"><h3>rust-lang/rust: Empowering everyone</h3></a>
      <div class="VwiC3b">This is the main source code repository for Rust.</div>
    </div></div></div>
    <div class="g"><div><div>
      <a href="https://www.reddit.com/r/rust/"><h3>r/rust</h3></a>
      <div class="VwiC3b">A place for all things related to the Rust programming language.</div>
    </div></div></div>
    <div class="g"><div><div>
      <a href="https://crates.io/"><h3>crates.io: Rust Package Registry</h3></a>
      <div class="VwiC3b">The Rust community's crate registry.</div>
    </div></div></div>
  </div>
  <a href="https://support.google.com/websearch">Help</a>
</body>
</html>"#;

/// Result blocks without any snippet markup, so only the block pass matches.
pub const BLOCKS_ONLY_PAGE: &str = r#"<html><body>
  <div class="g">
    <a href="/url?q=https://tokio.rs/&amp;sa=U"><h3>Tokio - An asynchronous Rust runtime</h3></a>
    <span>Build reliable network applications.</span>
  </div>
  <div class="g">
    <span>A block with neither heading nor link.</span>
  </div>
  <div class="g">
    <a href="https://www.google.com/preferences"><h3>Search settings</h3></a>
  </div>
</body></html>"#;

/// What the engine serves when it decides the client is a bot.
pub const CAPTCHA_PAGE: &str = r#"<html><body>
  <p>Our systems have detected unusual traffic from your computer network.</p>
  <form action="/sorry/index"><input type="submit"></form>
</body></html>"#;

/// Headings are present but no result can be paired or blocked.
pub const UNPAIRED_PAGE: &str = r#"<html><body>
  <h3>People also ask</h3>
  <a href="/search?q=rust+vs+go">rust vs go</a>
</body></html>"#;
