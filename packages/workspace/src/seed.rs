//! Starter site loaded when no site file exists yet.

use crate::document::{Component, Document};
use crate::state::EditorState;

pub fn seed_documents() -> Vec<Document> {
    vec![
        Document::new(
            "index",
            "index",
            "/",
            r##"<main class="p-8 bg-white">
  <h2 class="text-2xl font-bold mb-4">Latest news</h2>
  <div class="grid grid-cols-3 gap-4">
    <div class="border rounded-lg p-4 hover:shadow-lg transition-shadow">
      <img class="w-full h-32 object-cover rounded mb-2" src="https://picsum.photos/seed/placeholder/400/200" alt="Thumbnail" />
      <h3 class="font-bold">Title goes here</h3>
      <p class="text-sm text-gray-500">Excerpt goes here...</p>
    </div>
  </div>
  <a class="text-blue-500 mt-4 inline-block hover:underline" href="#">See all →</a>
</main>"##,
        ),
        Document::new(
            "about",
            "about",
            "/about",
            r#"<main class="p-8 bg-white">
  <h1 class="text-3xl font-bold mb-6">About Us</h1>
  <p class="text-gray-600 mb-4">A short description of who we are.</p>
  <div class="bg-gray-50 p-6 rounded-lg">
    <h2 class="text-xl font-semibold mb-2">Mission</h2>
    <p class="text-gray-600">What we set out to do.</p>
  </div>
</main>"#,
        ),
        Document::new(
            "products",
            "products",
            "/products",
            r#"<main class="p-8 bg-white">
  <h1 class="text-3xl font-bold mb-6">Products</h1>
  <div class="grid grid-cols-2 gap-6">
    <div class="border rounded-lg p-4">
      <h3 class="font-bold">Product A</h3>
      <p class="text-sm text-gray-500">About product A</p>
    </div>
    <div class="border rounded-lg p-4">
      <h3 class="font-bold">Product B</h3>
      <p class="text-sm text-gray-500">About product B</p>
    </div>
  </div>
</main>"#,
        ),
        Document::new(
            "products-slug",
            "[slug]",
            "/products/[slug]",
            r#"<main class="p-8 bg-white">
  <h1 class="text-3xl font-bold mb-6">Product details</h1>
  <div class="flex gap-8">
    <img class="w-64 h-64 object-cover rounded" src="https://picsum.photos/seed/product/400/400" alt="Product image" />
    <div>
      <p class="text-gray-600 mb-4">A detailed product description goes here.</p>
      <button class="bg-blue-500 text-white px-4 py-2 rounded">Buy now</button>
    </div>
  </div>
</main>"#,
        )
        .with_parent("products"),
        Document::new(
            "blog",
            "blog",
            "/blog",
            r#"<main class="p-8 bg-white">
  <h1 class="text-3xl font-bold mb-6">Blog</h1>
  <div class="space-y-4">
    <article class="border-b pb-4">
      <h2 class="text-xl font-bold">First post</h2>
      <p class="text-gray-500 text-sm">January 1, 2024</p>
    </article>
    <article class="border-b pb-4">
      <h2 class="text-xl font-bold">Second post</h2>
      <p class="text-gray-500 text-sm">January 2, 2024</p>
    </article>
  </div>
</main>"#,
        ),
        Document::new(
            "blog-slug",
            "[slug]",
            "/blog/[slug]",
            r#"<main class="p-8 bg-white max-w-2xl mx-auto">
  <h1 class="text-3xl font-bold mb-4">Post title</h1>
  <p class="text-gray-500 mb-8">January 1, 2024</p>
  <div class="prose">
    <p>The body of the post goes here.</p>
  </div>
</main>"#,
        )
        .with_parent("blog"),
        Document::new(
            "contact",
            "contact",
            "/contact",
            r#"<main class="p-8 bg-white max-w-xl mx-auto">
  <h1 class="text-3xl font-bold mb-6">Contact</h1>
  <form class="space-y-4">
    <div>
      <label class="block text-sm font-medium mb-1">Name</label>
      <input type="text" class="w-full border rounded px-3 py-2" />
    </div>
    <div>
      <label class="block text-sm font-medium mb-1">Email</label>
      <input type="email" class="w-full border rounded px-3 py-2" />
    </div>
    <div>
      <label class="block text-sm font-medium mb-1">Message</label>
      <textarea class="w-full border rounded px-3 py-2" rows="4"></textarea>
    </div>
    <button type="submit" class="bg-blue-500 text-white px-4 py-2 rounded">Send</button>
  </form>
</main>"#,
        ),
    ]
}

pub fn seed_components() -> Vec<Component> {
    vec![
        Component {
            id: "header".to_string(),
            name: "Header".to_string(),
            html: r#"<header class="bg-white border-b px-8 py-4">
  <nav class="flex items-center justify-between">
    <a href="/" class="text-xl font-bold">Logo</a>
    <div class="flex gap-4">
      <a href="/" class="hover:text-blue-500">Home</a>
      <a href="/about" class="hover:text-blue-500">About</a>
      <a href="/products" class="hover:text-blue-500">Products</a>
      <a href="/blog" class="hover:text-blue-500">Blog</a>
      <a href="/contact" class="hover:text-blue-500">Contact</a>
    </div>
  </nav>
</header>"#
                .to_string(),
        },
        Component {
            id: "footer".to_string(),
            name: "Footer".to_string(),
            html: r#"<footer class="bg-gray-100 px-8 py-6 mt-auto">
  <div class="flex justify-between items-center">
    <p class="text-gray-500 text-sm">&copy; 2024 Company Name</p>
    <div class="flex gap-4 text-sm">
      <a href="/privacy" class="text-gray-500 hover:text-gray-700">Privacy</a>
      <a href="/terms" class="text-gray-500 hover:text-gray-700">Terms</a>
    </div>
  </div>
</footer>"#
                .to_string(),
        },
    ]
}

/// State the editor starts from: seed site, `index` selected
pub fn initial_state() -> EditorState {
    EditorState {
        selected_document_id: Some("index".to_string()),
        ..EditorState::new(seed_documents(), seed_components())
    }
}
