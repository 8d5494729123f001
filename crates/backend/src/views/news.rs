use axum::response::Html;
use contracts::domain::articles::view::ArticleView;

use super::{esc, label, layout};

fn card(culture: &str, view: &ArticleView) -> String {
    let image = view
        .image_path
        .as_deref()
        .map(|path| {
            format!(
                "<img src=\"{}\" class=\"card-img-top\" alt=\"{}\">",
                esc(path),
                esc(&view.title)
            )
        })
        .unwrap_or_default();

    let subtitle = view
        .subtitle
        .as_deref()
        .map(|s| format!("<h6 class=\"card-subtitle mb-3 text-info\">{}</h6>", esc(s)))
        .unwrap_or_default();

    let preview: String = view.text.chars().take(150).collect();

    format!(
        r#"<div class="col-md-4 mb-4">
  <div class="card h-100 bg-dark text-light shadow-lg border-0">
    {image}
    <div class="card-body">
      <h5 class="card-title text-warning fw-bold">{title}</h5>
      {subtitle}
      <p class="card-text text-light">{preview}...</p>
      <a class="btn btn-outline-warning w-100 fw-bold" href="/news/details/{id}">{read_more}</a>
    </div>
  </div>
</div>"#,
        image = image,
        title = esc(&view.title),
        subtitle = subtitle,
        preview = esc(&preview),
        id = view.id,
        read_more = label(culture, "Читать далее", "Read More"),
    )
}

/// Главная: последние статьи
pub fn index(culture: &str, views: &[ArticleView]) -> Html<String> {
    let cards: String = views.iter().map(|v| card(culture, v)).collect();
    let body = format!(
        "<h1 class=\"mb-4\">{}</h1><div class=\"row\">{}</div>",
        label(culture, "Последние новости", "Latest news"),
        cards
    );
    layout(culture, "/", label(culture, "Новости", "News"), &body)
}

/// Все новости: оболочка, партии статей подгружаются скриптом по скроллу
pub fn all(culture: &str) -> Html<String> {
    let body = format!(
        r#"<h1 class="mb-4">{heading}</h1>
<div id="news-root" class="row"></div>
<script>
(function () {{
    const batchSize = 6;
    let skip = 0;
    let done = false;
    let loading = false;
    const root = document.getElementById("news-root");

    async function loadMore() {{
        if (done || loading) return;
        loading = true;
        const response = await fetch(`/news/articles?skip=${{skip}}&take=${{batchSize}}`);
        const articles = await response.json();
        if (articles.length === 0) {{
            done = true;
            loading = false;
            return;
        }}
        skip += articles.length;
        for (const article of articles) {{
            const col = document.createElement("div");
            col.className = "col-md-4 mb-4";
            const card = document.createElement("div");
            card.className = "card h-100 bg-dark text-light shadow-lg border-0";
            if (article.imagePath) {{
                const img = document.createElement("img");
                img.src = article.imagePath;
                img.className = "card-img-top";
                img.alt = article.title;
                card.appendChild(img);
            }}
            const bodyEl = document.createElement("div");
            bodyEl.className = "card-body";
            const title = document.createElement("h5");
            title.className = "card-title text-warning fw-bold";
            title.textContent = article.title;
            bodyEl.appendChild(title);
            if (article.subtitle) {{
                const subtitle = document.createElement("h6");
                subtitle.className = "card-subtitle mb-3 text-info";
                subtitle.textContent = article.subtitle;
                bodyEl.appendChild(subtitle);
            }}
            const text = document.createElement("p");
            text.className = "card-text text-light";
            text.textContent = article.text.substring(0, 150) + "...";
            bodyEl.appendChild(text);
            const link = document.createElement("a");
            link.className = "btn btn-outline-warning w-100 fw-bold";
            link.href = `/news/details/${{article.id}}`;
            link.textContent = "{read_more}";
            bodyEl.appendChild(link);
            card.appendChild(bodyEl);
            col.appendChild(card);
            root.appendChild(col);
        }}
        loading = false;
    }}

    window.addEventListener("scroll", () => {{
        if (window.innerHeight + window.scrollY >= document.body.offsetHeight - 200) {{
            loadMore();
        }}
    }});
    loadMore();
}})();
</script>"#,
        heading = label(culture, "Все новости", "All news"),
        read_more = label(culture, "Читать далее", "Read More"),
    );
    layout(
        culture,
        "/news/all",
        label(culture, "Все новости", "All news"),
        &body,
    )
}

/// Детальная страница статьи
pub fn details(culture: &str, view: &ArticleView) -> Html<String> {
    let current_path = format!("/news/details/{}", view.id);

    let image = view
        .image_path
        .as_deref()
        .map(|path| {
            format!(
                "<img src=\"{}\" class=\"img-fluid rounded mb-4\" alt=\"{}\">",
                esc(path),
                esc(&view.title)
            )
        })
        .unwrap_or_default();

    let subtitle = view
        .subtitle
        .as_deref()
        .map(|s| format!("<h4 class=\"text-info mb-3\">{}</h4>", esc(s)))
        .unwrap_or_default();

    let paragraphs: String = view
        .text
        .split('\n')
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p>{}</p>", esc(p)))
        .collect();

    let body = format!(
        r#"<article class="col-lg-8 mx-auto">
  <h1 class="text-warning fw-bold mb-2">{title}</h1>
  <p class="text-secondary">{date}</p>
  {image}
  {subtitle}
  {paragraphs}
</article>"#,
        title = esc(&view.title),
        date = view.created_at.format("%d.%m.%Y"),
        image = image,
        subtitle = subtitle,
        paragraphs = paragraphs,
    );
    layout(culture, &current_path, &view.title, &body)
}
