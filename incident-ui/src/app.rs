use commander_core::architecture;
use commander_core::catalog::{self, Catalog, Severity, Step};
use commander_core::incidents::{mock_incidents, IncidentBoard, IncidentFilter};
use commander_core::nav::{Page, REPOSITORY_URL, SITE_TITLE};
use commander_core::stepper::StepController;
use leptos::*;
use leptos_router::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

const TICK_INTERVAL: Duration = Duration::from_secs(3);

fn severity_class(severity: Option<Severity>) -> &'static str {
    severity.map(Severity::css_class).unwrap_or("severity-none")
}

/// Hands `handle` to `release` when the current reactive owner is
/// disposed or re-runs.
fn release_on_cleanup<H: 'static>(handle: H, release: impl FnOnce(H) + 'static) {
    on_cleanup(move || release(handle));
}

/// Runs `tick` every `interval` until the owning component is disposed.
fn start_tick(interval: Duration, tick: impl Fn() + 'static) {
    match set_interval_with_handle(tick, interval) {
        Ok(handle) => release_on_cleanup(handle, |handle| handle.clear()),
        Err(err) => warn!("could not start board tick: {err:?}"),
    }
}

fn advance_step(controller: RwSignal<StepController>) {
    controller.update(|c| {
        c.advance();
    });
}

fn retreat_step(controller: RwSignal<StepController>) {
    controller.update(|c| {
        c.retreat();
    });
}

fn choose_scenario(controller: RwSignal<StepController>, id: &str) {
    controller.update(|c| c.select_scenario(id));
}

fn choose_incident(board: RwSignal<IncidentBoard>, id: &str) {
    board.update(|b| {
        if let Err(err) = b.select(id) {
            warn!("{err}");
        }
    });
}

fn tick_board(board: RwSignal<IncidentBoard>) {
    board.update(|b| {
        b.tick();
    });
}

#[component]
pub fn App() -> impl IntoView {
    let catalog = match catalog::builtin() {
        Ok(catalog) => Arc::new(catalog),
        Err(err) => return view! { <pre class="error">{err.to_string()}</pre> }.into_view(),
    };
    let home_catalog = catalog.clone();

    view! {
      <Router>
        <header class="site">
          <A class="brand" href="/">{SITE_TITLE}</A>
          <nav>
            {Page::NAV
                .into_iter()
                .map(|p| view! {
                  <A href=p.path() exact=true active_class="active">{p.label()}</A>
                })
                .collect_view()}
            <a href=REPOSITORY_URL target="_blank" rel="noreferrer">"GitHub"</a>
          </nav>
        </header>
        <main>
          <Routes>
            <Route path="/" view=move || view! { <HomeView catalog=home_catalog.clone()/> }/>
            <Route path="/demo" view=move || view! { <DemoView catalog=catalog.clone()/> }/>
            <Route path="/architecture" view=ArchitectureView/>
            <Route path="/incidents" view=IncidentsView/>
            <Route path="/*any" view=NotFound/>
          </Routes>
        </main>
      </Router>
    }
    .into_view()
}

#[component]
fn NotFound() -> impl IntoView {
    let location = use_location();
    view! {
      <h1>"Not found"</h1>
      <p>"No view at " <code>{move || location.pathname.get()}</code> "."</p>
    }
}

#[component]
fn HomeView(catalog: Arc<Catalog>) -> impl IntoView {
    view! {
      <section class="hero">
        <h1>"DevOps Incident Commander"</h1>
        <p>
          "A visual companion for a multi-agent incident response system. Five agents \
           coordinate severity triage, diagnosis, remediation, and communication in one flow."
        </p>
        <div class="row">
          <A class="button" href=Page::Demo.path()>"Open Live Demo"</A>
          <A class="button" href=Page::Architecture.path()>"View Architecture"</A>
        </div>
      </section>

      <section>
        <h2>"How it works"</h2>
        <ol class="flow">
          {architecture::agent_flow()
              .into_iter()
              .enumerate()
              .map(|(idx, stage)| view! {
                <li><small>{format!("Step {}", idx + 1)}</small> {stage}</li>
              })
              .collect_view()}
        </ol>
      </section>

      <section>
        <h2>"Incident scenarios"</h2>
        {catalog
            .cards()
            .into_iter()
            .map(|card| view! {
              <article class="card">
                <h3>{card.name}</h3>
                <span class=format!("badge {}", severity_class(card.severity))>
                  {card.severity.map(Severity::label).unwrap_or_default()}
                </span>
                <p>{card.description}</p>
              </article>
            })
            .collect_view()}
      </section>
    }
}

#[component]
fn ArchitectureView() -> impl IntoView {
    let arch = architecture::architecture();

    view! {
      <h1>"Architecture"</h1>
      <section class="agents">
        {arch
            .agents
            .into_iter()
            .enumerate()
            .map(|(idx, agent)| view! {
              <article>
                <small>{format!("Stage {}", idx + 1)}</small>
                <h2>{agent.name}</h2>
                <p class="role">{agent.role}</p>
                <p><span class="meta">"In: "</span>{agent.receives}</p>
                <p><span class="meta">"Out: "</span>{agent.emits}</p>
                <div class="tools">
                  {agent.tool_group.into_iter().map(|t| view! { <code>{t}</code> }).collect_view()}
                </div>
              </article>
            })
            .collect_view()}
      </section>
      <section>
        <h2>"Data flow"</h2>
        <ul class="sources">
          {arch
              .data_sources
              .into_iter()
              .map(|s| view! { <li>{s.name} " " <code>{s.index}</code></li> })
              .collect_view()}
        </ul>
      </section>
    }
}

#[component]
fn StepCard(index: usize, step: Step) -> impl IntoView {
    view! {
      <article class="step">
        <div class="row">
          <small>{format!("Step {}", index + 1)}</small>
          <b>{step.agent}</b>
          {step.severity.map(|s| view! { <span class=format!("badge {}", s.css_class())>{s.label()}</span> })}
        </div>
        <p class="title">{step.title}</p>
        <p class="meta">{step.detail}</p>
      </article>
    }
}

#[component]
fn DemoView(catalog: Arc<Catalog>) -> impl IntoView {
    let controller = create_rw_signal(StepController::new(catalog.clone()));

    view! {
      <h1>"Interactive Demo"</h1>
      <section class="scenarios">
        {catalog
            .scenarios()
            .iter()
            .map(|s| {
                let id = s.id.clone();
                let selected_id = s.id.clone();
                view! {
                  <button
                    class="scenario"
                    class:selected=move || controller.with(|c| c.scenario().id == selected_id)
                    on:click=move |_| choose_scenario(controller, &id)
                  >
                    <p>{s.name.clone()}</p>
                    <small>{s.service.clone()}</small>
                  </button>
                }
            })
            .collect_view()}
      </section>

      <section class="timeline">
        <h2>{move || controller.with(|c| c.scenario().name.clone())}</h2>
        <p>{move || controller.with(|c| c.scenario().summary.clone())}</p>
        {move || controller.with(|c| {
            c.visible_steps()
                .iter()
                .enumerate()
                .map(|(index, step)| view! { <StepCard index=index step=step.clone()/> })
                .collect_view()
        })}
        <div class="row">
          <button on:click=move |_| retreat_step(controller)>"Previous step"</button>
          <button on:click=move |_| advance_step(controller)>
            {move || if controller.with(StepController::is_complete) {
                "Scenario complete"
            } else {
                "Next step"
            }}
          </button>
        </div>
      </section>
    }
}

#[component]
fn IncidentsView() -> impl IntoView {
    let board = match IncidentBoard::new(mock_incidents()) {
        Ok(board) => create_rw_signal(board),
        Err(err) => return view! { <pre class="error">{err.to_string()}</pre> }.into_view(),
    };
    let filter = create_rw_signal(IncidentFilter::All);

    start_tick(TICK_INTERVAL, move || tick_board(board));

    view! {
      <div class="layout">
        <aside class="panel">
          <h2>"Incidents"</h2>
          <div class="row meta">
            <span>{move || format!("{} active", board.with(IncidentBoard::active_count))}</span>
            <span>{move || format!("{} resolved today", board.with(IncidentBoard::resolved_today))}</span>
            <span class="live" title=move || format!("refresh #{}", board.with(IncidentBoard::ticks))>
              "Live"
            </span>
          </div>
          <div class="row">
            {IncidentFilter::ALL
                .into_iter()
                .map(|f| view! {
                  <button class:active=move || filter.get() == f on:click=move |_| filter.set(f)>
                    {f.label()}
                  </button>
                })
                .collect_view()}
          </div>
          <ul>
            {move || {
                let f = filter.get();
                board
                    .with(|b| b.filtered(f).cloned().collect::<Vec<_>>())
                    .into_iter()
                    .map(|incident| {
                        let id = incident.id.clone();
                        let selected_id = incident.id.clone();
                        view! {
                          <li
                            class:selected=move || board.with(|b| b.selected_id() == selected_id)
                            on:click=move |_| choose_incident(board, &id)
                          >
                            <div>
                              <b>{incident.id.clone()}</b>
                              " "
                              <span class=format!("badge {}", incident.severity.css_class())>
                                {incident.severity.label()}
                              </span>
                              <span class="meta">{format!(" ({})", incident.status)}</span>
                            </div>
                            <div>{incident.title.clone()}</div>
                            <div class="meta">{format!("{} · {}", incident.service, incident.started_at)}</div>
                          </li>
                        }
                    })
                    .collect_view()
            }}
          </ul>
        </aside>

        <section class="panel">
          {move || board.with(|b| {
              let incident = b.selected().clone();
              view! {
                <h2>{incident.title}</h2>
                <div class="meta">
                  {format!("{} · {} · {}", incident.id, incident.service, incident.status)}
                </div>
                <p>{incident.summary}</p>
              }
          })}
        </section>
      </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn controller() -> RwSignal<StepController> {
        let catalog = catalog::builtin().expect("catalog");
        create_rw_signal(StepController::new(Arc::new(catalog)))
    }

    #[test]
    fn untagged_steps_get_neutral_badge() {
        assert_eq!(severity_class(None), "severity-none");
        assert_eq!(severity_class(Some(Severity::P2)), "severity-p2");
    }

    #[test]
    fn step_buttons_move_reveal_index() {
        let runtime = create_runtime();
        let controller = controller();

        advance_step(controller);
        advance_step(controller);
        assert_eq!(controller.with(StepController::reveal_index), 2);
        retreat_step(controller);
        assert_eq!(controller.with(StepController::reveal_index), 1);

        for _ in 0..10 {
            advance_step(controller);
        }
        assert!(controller.with(StepController::is_complete));
        assert_eq!(controller.with(|c| c.visible_steps().len()), 5);

        runtime.dispose();
    }

    #[test]
    fn scenario_button_rewinds_to_first_step() {
        let runtime = create_runtime();
        let controller = controller();

        advance_step(controller);
        choose_scenario(controller, "memory-leak");
        assert_eq!(controller.with(|c| c.scenario().id.clone()), "memory-leak");
        assert_eq!(controller.with(StepController::reveal_index), 0);

        runtime.dispose();
    }

    #[test]
    fn incident_click_selects_and_unknown_id_keeps_selection() {
        let runtime = create_runtime();
        let board = create_rw_signal(IncidentBoard::new(mock_incidents()).expect("board"));

        choose_incident(board, "INC-2038");
        assert_eq!(board.with(|b| b.selected_id().to_string()), "INC-2038");
        choose_incident(board, "INC-0000");
        assert_eq!(board.with(|b| b.selected_id().to_string()), "INC-2038");

        runtime.dispose();
    }

    #[test]
    fn tick_stops_once_owner_is_cleaned_up() {
        let runtime = create_runtime();
        let board = create_rw_signal(IncidentBoard::new(mock_incidents()).expect("board"));
        let mounted = create_rw_signal(true);
        let running = Rc::new(Cell::new(false));

        let flag = running.clone();
        create_effect(move |_| {
            if mounted.get() {
                flag.set(true);
                let flag = flag.clone();
                release_on_cleanup((), move |()| flag.set(false));
            }
        });
        let fire = || {
            if running.get() {
                tick_board(board);
            }
        };

        fire();
        fire();
        assert_eq!(board.with(IncidentBoard::ticks), 2);

        mounted.set(false);
        assert!(!running.get());
        fire();
        assert_eq!(board.with(IncidentBoard::ticks), 2);

        runtime.dispose();
    }
}
