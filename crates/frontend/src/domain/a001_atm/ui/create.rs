//! "Tambah ATM" modal. Every missing field is reported before anything is sent.

use contracts::domain::a001_atm::{AtmForm, FieldError};
use contracts::domain::a002_branch::Branch;
use contracts::enums::MachineType;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_atm::api;
use crate::domain::a002_branch::ui::picker::BranchPicker;
use crate::layout::toast_service::use_toast;
use crate::shared::components::load_state::ErrorBar;

#[derive(Clone, Copy)]
struct FormFields {
    code: RwSignal<String>,
    name: RwSignal<String>,
    address: RwSignal<String>,
    machine_type: RwSignal<String>,
    brand: RwSignal<String>,
    branch: RwSignal<Option<Branch>>,
    latitude: RwSignal<String>,
    longitude: RwSignal<String>,
    electricity_cost: RwSignal<String>,
    electronic_cost: RwSignal<String>,
    rent_cost: RwSignal<String>,
    machine_cost: RwSignal<String>,
    replenishment_cost: RwSignal<String>,
}

impl FormFields {
    fn new() -> Self {
        Self {
            code: RwSignal::new(String::new()),
            name: RwSignal::new(String::new()),
            address: RwSignal::new(String::new()),
            machine_type: RwSignal::new(MachineType::Atm.code().to_string()),
            brand: RwSignal::new(String::new()),
            branch: RwSignal::new(None),
            latitude: RwSignal::new(String::new()),
            longitude: RwSignal::new(String::new()),
            electricity_cost: RwSignal::new(String::new()),
            electronic_cost: RwSignal::new(String::new()),
            rent_cost: RwSignal::new(String::new()),
            machine_cost: RwSignal::new(String::new()),
            replenishment_cost: RwSignal::new(String::new()),
        }
    }

    fn snapshot(&self) -> AtmForm {
        AtmForm {
            code: self.code.get_untracked(),
            name: self.name.get_untracked(),
            address: self.address.get_untracked(),
            machine_type: self.machine_type.get_untracked(),
            brand: self.brand.get_untracked(),
            branch_id: self.branch.with_untracked(|b| b.as_ref().map(|b| b.id)),
            latitude: self.latitude.get_untracked(),
            longitude: self.longitude.get_untracked(),
            electricity_cost: self.electricity_cost.get_untracked(),
            electronic_cost: self.electronic_cost.get_untracked(),
            rent_cost: self.rent_cost.get_untracked(),
            machine_cost: self.machine_cost.get_untracked(),
            replenishment_cost: self.replenishment_cost.get_untracked(),
        }
    }

    fn reset(&self) {
        for s in [
            self.code,
            self.name,
            self.address,
            self.brand,
            self.latitude,
            self.longitude,
            self.electricity_cost,
            self.electronic_cost,
            self.rent_cost,
            self.machine_cost,
            self.replenishment_cost,
        ] {
            s.set(String::new());
        }
        self.machine_type.set(MachineType::Atm.code().to_string());
        self.branch.set(None);
    }
}

#[component]
fn TextField(label: &'static str, value: RwSignal<String>, #[prop(optional)] placeholder: &'static str) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <Input value=value placeholder=placeholder />
        </div>
    }
}

#[component]
pub fn AtmCreateDialog(open: RwSignal<bool>, on_created: Callback<()>) -> impl IntoView {
    let toast = use_toast();
    let fields = FormFields::new();
    let field_errors = RwSignal::new(Vec::<FieldError>::new());
    let submit_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let close = move || {
        open.set(false);
        field_errors.set(Vec::new());
        submit_error.set(None);
    };

    let submit = move |_: ev::MouseEvent| {
        if saving.get_untracked() {
            return;
        }
        submit_error.set(None);
        let dto = match fields.snapshot().validate() {
            Ok(dto) => dto,
            Err(errors) => {
                field_errors.set(errors);
                return;
            }
        };
        field_errors.set(Vec::new());
        saving.set(true);
        spawn_local(async move {
            match api::create_atm(&dto).await {
                Ok(_) => {
                    toast.success(format!("ATM {} ditambahkan", dto.code));
                    fields.reset();
                    close();
                    on_created.run(());
                }
                Err(e) => {
                    log::error!("create ATM failed: {}", e);
                    submit_error.set(Some(e.user_message()));
                }
            }
            saving.set(false);
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Tambah ATM"</DialogTitle>
                    <DialogContent>
                        <Show when=move || !field_errors.with(|e| e.is_empty())>
                            <div class="form-errors">
                                <MessageBar intent=MessageBarIntent::Warning>
                                    <ul>
                                        {move || field_errors.get().into_iter().map(|e| view! {
                                            <li>{e.message}</li>
                                        }).collect_view()}
                                    </ul>
                                </MessageBar>
                            </div>
                        </Show>
                        <ErrorBar message=submit_error />

                        <div class="form-grid">
                            <TextField label="Kode ATM" value=fields.code />
                            <TextField label="Nama" value=fields.name />
                            <TextField label="Alamat" value=fields.address />
                            <div class="form-group">
                                <label>"Tipe mesin"</label>
                                <Select value=fields.machine_type>
                                    {MachineType::all().into_iter().map(|t| view! {
                                        <option value=t.code()>{t.display_name()}</option>
                                    }).collect_view()}
                                </Select>
                            </div>
                            <TextField label="Merek" value=fields.brand />
                            <div class="form-group">
                                <label>"Cabang"</label>
                                <BranchPicker selected=fields.branch />
                            </div>
                            <TextField label="Latitude" value=fields.latitude placeholder="-6.9147" />
                            <TextField label="Longitude" value=fields.longitude placeholder="107.6098" />
                        </div>

                        <h4>"Biaya bulanan"</h4>
                        <div class="form-grid">
                            <TextField label="Listrik" value=fields.electricity_cost placeholder="0" />
                            <TextField label="Elektronik" value=fields.electronic_cost placeholder="0" />
                            <TextField label="Sewa" value=fields.rent_cost placeholder="0" />
                            <TextField label="Mesin" value=fields.machine_cost placeholder="0" />
                            <TextField label="Replenishment" value=fields.replenishment_cost placeholder="0" />
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| close()>
                            "Batal"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=saving
                            on_click=submit
                        >
                            {move || if saving.get() { "Menyimpan..." } else { "Simpan" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
