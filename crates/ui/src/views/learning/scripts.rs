/// Loads Mermaid on first use and renders every `.mermaid` block on the page.
pub(super) const RENDER_MERMAID: &str = r#"
(() => {
  const render = () =>
    window.mermaid
      .run({ querySelector: '.mermaid:not([data-processed])' })
      .catch((err) => console.warn('mermaid render failed', err));
  if (window.mermaid) {
    render();
    return;
  }
  const script = document.createElement('script');
  script.src = 'https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js';
  script.onload = () => {
    window.mermaid.initialize({ startOnLoad: false, theme: 'neutral', securityLevel: 'strict' });
    render();
  };
  document.head.appendChild(script);
})();
"#;
