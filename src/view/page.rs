//! The viewer page shell
//!
//! A static HTML document with empty regions for the panel, header, body
//! and stats. It reports user events through `window.ipc.postMessage` and
//! exposes `window.__applyFrame`, which applies a serialized [`Frame`].
//! It never computes anything about the table itself.

use crate::surface::Frame;

const STYLE: &str = r#"
html, body { margin: 0; height: 100%; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; font-size: 14px; color: #363636; }
body { display: flex; flex-direction: column; overflow-anchor: none; }
#toolbar { display: flex; align-items: center; gap: 12px; padding: 8px 12px; border-bottom: 1px solid #dbdbdb; background: #fafafa; }
#toolbar input[type=search] { flex: 0 1 320px; padding: 4px 8px; border: 1px solid #dbdbdb; border-radius: 4px; }
#stats { margin-left: auto; color: #7a7a7a; }
#busy { display: none; width: 14px; height: 14px; border: 2px solid #dbdbdb; border-top-color: #485fc7; border-radius: 50%; animation: spin 0.8s linear infinite; }
#busy.is-active { display: inline-block; }
@keyframes spin { to { transform: rotate(360deg); } }
#panel { display: none; margin: 24px; }
body.has-panel #panel { display: block; }
body.has-panel:not(.keep-toolbar) #toolbar, body.has-panel #head, body.has-panel #scroller { display: none; }
.notification { padding: 20px 24px; border-radius: 4px; }
.notification .title { font-size: 1.25em; margin: 0 0 8px; }
.is-danger { background: #feecf0; color: #cc0f35; }
.is-warning { background: #fffaeb; color: #946c00; }
.is-info { background: #eff5fb; color: #296fa8; }
table { width: 100%; table-layout: fixed; border-collapse: collapse; }
th, td { padding: 0.5em 0.75em; border: 1px solid #dbdbdb; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; text-align: left; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
#head th { background: #f5f5f5; cursor: pointer; user-select: none; }
#head th:hover { background: #eeeeee; }
#scroller { flex: 1; overflow: auto; position: relative; }
#spacer { position: relative; }
#grid { position: absolute; top: 0; left: 0; will-change: transform; }
#grid tr:nth-child(even) { background: #fafafa; }
#grid tr:hover { background: #f0f4ff; }
mark { background: #ffe08a; color: inherit; padding: 0; }
#tooltip { display: none; position: fixed; padding: 4px 8px; border-radius: 4px; background: #363636; color: #fff; font-size: 12px; pointer-events: none; }
#tooltip.is-active { display: block; }
"#;

const BODY: &str = r#"
<div id="toolbar">
  <input id="search" type="search" placeholder="Search..." autocomplete="off">
  <button id="clear" type="button">Clear</button>
  <label><input id="header-row" type="checkbox" checked> Header row</label>
  <span id="busy" title="Working..."></span>
  <span id="stats"></span>
</div>
<div id="panel"></div>
<table id="head"><thead></thead></table>
<div id="scroller"><div id="spacer"><table id="grid"><tbody></tbody></table></div></div>
<div id="tooltip"></div>
"#;

const SCRIPT: &str = r#"
(function () {
  const $ = (id) => document.getElementById(id);
  const scroller = $('scroller'), spacer = $('spacer'), grid = $('grid');
  const tbody = grid.tBodies[0], thead = $('head').tHead;
  const search = $('search'), headerRow = $('header-row');
  let lastHeight = -1;

  function post(msg) {
    if (window.ipc && window.ipc.postMessage) {
      window.ipc.postMessage(JSON.stringify(msg));
    }
  }

  function reportHeight(type) {
    const h = scroller.clientHeight;
    if (h !== lastHeight) {
      lastHeight = h;
      post({ type: type, viewportHeight: h });
    }
  }

  function measure(html) {
    tbody.insertAdjacentHTML('beforeend', html);
    const row = tbody.lastElementChild;
    const height = row ? row.getBoundingClientRect().height : 0;
    if (row) row.remove();
    post({ type: 'measured', rowHeight: Number.isFinite(height) ? height : null });
  }

  const ops = {
    title: (p) => { document.title = p.text; },
    panel: (p) => {
      $('panel').innerHTML = p.html;
      document.body.classList.toggle('has-panel', p.html !== '');
      document.body.classList.toggle('keep-toolbar', p.toolbar);
      if (p.html === '') reportHeight('resize');
    },
    header: (p) => { thead.innerHTML = p.html; },
    spacer: (p) => { spacer.style.height = p.height + 'px'; },
    body: (p) => {
      tbody.innerHTML = p.html;
      grid.style.transform = 'translateY(' + p.offset + 'px)';
    },
    stats: (p) => { $('stats').textContent = p.text; },
    busy: (p) => { $('busy').classList.toggle('is-active', p.visible); },
    tooltip: (p) => {
      const tip = $('tooltip');
      tip.textContent = p.text;
      tip.style.left = p.x + 'px';
      tip.style.top = Math.max(0, p.y - 32) + 'px';
      tip.classList.add('is-active');
    },
    hideTooltip: () => { $('tooltip').classList.remove('is-active'); },
    measure: (p) => measure(p.html),
    controls: (p) => {
      if (search.value !== p.search) search.value = p.search;
      headerRow.checked = p.header;
    },
  };

  window.__applyFrame = function (frame) {
    for (const patch of frame.patches) {
      const apply = ops[patch.op];
      if (apply) apply(patch);
    }
  };

  scroller.addEventListener('scroll', () => {
    post({ type: 'scroll', offset: scroller.scrollTop });
  }, { passive: true });
  window.addEventListener('resize', () => reportHeight('resize'), { passive: true });

  search.addEventListener('input', () => post({ type: 'search', term: search.value }));
  $('clear').addEventListener('click', () => {
    search.value = '';
    post({ type: 'clearSearch' });
  });
  headerRow.addEventListener('change', () => post({ type: 'toggleHeader', enabled: headerRow.checked }));

  thead.addEventListener('click', (e) => {
    const th = e.target.closest('th');
    if (th) post({ type: 'sort', column: Number(th.dataset.col) });
  });
  tbody.addEventListener('dblclick', (e) => {
    const td = e.target.closest('td');
    const tr = td && td.closest('tr');
    if (!td || !tr || tr.dataset.row === undefined) return;
    post({
      type: 'copyCell',
      row: Number(tr.dataset.row),
      column: Number(td.dataset.col),
      x: e.clientX,
      y: e.clientY,
    });
  });

  reportHeight('ready');
})();
"#;

/// The interactive viewer page
pub fn page_html() -> String {
    document("CSV QuickView", "")
}

/// A self-contained page with one frame already applied
///
/// The page works without an IPC channel, so this is a static rendering of
/// the viewer at `scroll_offset`.
pub fn snapshot_html(frame: &Frame, scroll_offset: f64) -> Result<String, serde_json::Error> {
    // `</` inside a script element would end it early
    let json = frame.to_json()?.replace("</", "<\\/");
    let init = format!(
        "<script>window.__applyFrame({});document.getElementById('scroller').scrollTop = {};</script>",
        json, scroll_offset
    );
    Ok(document("CSV QuickView", &init))
}

fn document(title: &str, extra: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>{}<script>{}</script>{}</body>\n</html>\n",
        title, STYLE, BODY, SCRIPT, extra
    )
}
