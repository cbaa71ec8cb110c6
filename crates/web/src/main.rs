use leptos::prelude::*;
use mergeinsert::input::{InputError, parse_values};
use mergeinsert::merge_insert_sort;
use wasm_bindgen::JsValue;

mod stepper;

use stepper::{Snapshot, Stepper};

const QUERY_KEY: &str = "values";
const DEFAULT_VALUES: &str = "7 2 9 4 6 21 3 8 1 13 5";

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}

#[component]
fn App() -> impl IntoView {
    let (raw, set_raw) = signal(initial_values());
    let (cursor, set_cursor) = signal(0usize);
    let trace = Memo::new(move |_| raw.with(|raw| build_trace(raw)));

    view! {
        <main>
            <h1>"Merge-insertion sort"</h1>
            <input
                type="text"
                size="60"
                prop:value=move || raw.get()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    remember_values(&value);
                    set_raw.set(value);
                    set_cursor.set(0);
                }
            />
            {move || match trace.get() {
                Ok(trace) => render_trace(trace, cursor, set_cursor).into_any(),
                Err(err) => view! { <p class="error">{err.to_string()}</p> }.into_any(),
            }}
        </main>
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Trace {
    len: usize,
    elapsed_ms: f64,
    snapshots: Vec<Snapshot>,
}

fn build_trace(raw: &str) -> Result<Trace, InputError> {
    let values = parse_values(raw.split(','))?;

    let start = js_sys::Date::now();
    let sorted = merge_insert_sort(values.clone());
    let elapsed_ms = js_sys::Date::now() - start;

    Ok(Trace {
        len: sorted.len(),
        elapsed_ms,
        snapshots: Stepper::new(values).collect(),
    })
}

fn render_trace(
    trace: Trace,
    cursor: ReadSignal<usize>,
    set_cursor: WriteSignal<usize>,
) -> impl IntoView {
    let last = trace.snapshots.len().saturating_sub(1);
    let snapshots = trace.snapshots;

    view! {
        <p>{format!("Sorted {} values in {:.3} ms", trace.len, trace.elapsed_ms)}</p>
        <nav>
            <button
                disabled=move || cursor.get() == 0
                on:click=move |_| set_cursor.update(|c| *c = c.saturating_sub(1))
            >
                "Previous"
            </button>
            <span>{move || format!(" {} / {} ", cursor.get().min(last) + 1, last + 1)}</span>
            <button
                disabled=move || cursor.get() >= last
                on:click=move |_| set_cursor.update(|c| *c = (*c + 1).min(last))
            >
                "Next"
            </button>
        </nav>
        {move || render_snapshot(&snapshots[cursor.get().min(last)])}
    }
}

fn render_snapshot(snapshot: &Snapshot) -> impl IntoView + use<> {
    let pairs = snapshot
        .pairs
        .iter()
        .map(|(low, high)| format!("({low}, {high})"))
        .collect::<Vec<_>>();
    let spent = snapshot.comparisons;
    let rows = [
        ("Input", join(&snapshot.unsorted)),
        ("Pairs", join(&pairs)),
        ("Main chain", join(&snapshot.main_chain)),
        ("Pending", join(&snapshot.pending)),
        ("Schedule", join(&snapshot.schedule)),
        (
            "Straggler",
            snapshot
                .straggler
                .map_or_else(|| "none".to_owned(), |s| s.to_string()),
        ),
        (
            "Comparisons",
            format!(
                "{} pairing, {} ordering, {} insertion",
                spent.pairing, spent.ordering, spent.insertion
            ),
        ),
    ];

    view! {
        <section>
            <h2>{snapshot.stage.to_string()}</h2>
            <dl>
                {rows
                    .into_iter()
                    .map(|(label, text)| view! {
                        <dt>{label}</dt>
                        <dd>{text}</dd>
                    })
                    .collect_view()}
            </dl>
        </section>
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    if values.is_empty() {
        return "(empty)".to_owned();
    }
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads the values from `?values=` so a shared link reopens the same input.
fn initial_values() -> String {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix(QUERY_KEY)?.strip_prefix('='))
        .and_then(|encoded| js_sys::decode_uri_component(encoded).ok())
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_VALUES.to_owned())
}

fn remember_values(raw: &str) {
    let Some(history) = web_sys::window().and_then(|window| window.history().ok()) else {
        return;
    };
    let encoded = String::from(js_sys::encode_uri_component(raw));
    let url = format!("?{QUERY_KEY}={encoded}");
    let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url.as_str()));
}
