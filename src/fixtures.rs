//! Shared mmCIF test entry.
//!
//! Chain A: canonical `MARNCQEK` (ids 1-8), modeled 2-7, ASN/ASP
//! microheterogeneity at 4, author numbers offset by 10.
//! Chain B: canonical `GHILK` (ids 1-5), 3 unmodeled, author numbers 101-105,
//! plus one water (subchain C).
//! One helix A 13-15 (ids 3-5), one two-stranded sheet: A 16-17 (ids 6-7)
//! and B 104-105 (ids 4-5), anti-parallel.

pub(crate) const ENTRY_1TST: &str = r#"data_1TST
#
_entry.id 1TST
#
_struct.title 'Test structure of a small protein'
#
_entity_src_gen.entity_id 1
_entity_src_gen.pdbx_gene_src_scientific_name 'Homo sapiens'
#
loop_
_pdbx_audit_revision_history.ordinal
_pdbx_audit_revision_history.data_content_type
_pdbx_audit_revision_history.revision_date
1 'Structure model' 2001-01-15
2 'Structure model' 2009-02-24
#
loop_
_entity.id
_entity.type
_entity.src_method
_entity.pdbx_description
1 polymer man 'Test protein'
2 water   nat water
#
_entity_poly.entity_id 1
_entity_poly.type 'polypeptide(L)'
_entity_poly.nstd_linkage no
#
loop_
_struct_asym.id
_struct_asym.pdbx_blank_PDB_chainid_flag
_struct_asym.entity_id
A N 1
B N 1
C N 2
#
loop_
_pdbx_poly_seq_scheme.asym_id
_pdbx_poly_seq_scheme.entity_id
_pdbx_poly_seq_scheme.seq_id
_pdbx_poly_seq_scheme.mon_id
_pdbx_poly_seq_scheme.ndb_seq_num
_pdbx_poly_seq_scheme.pdb_seq_num
_pdbx_poly_seq_scheme.auth_seq_num
_pdbx_poly_seq_scheme.pdb_mon_id
_pdbx_poly_seq_scheme.auth_mon_id
_pdbx_poly_seq_scheme.pdb_strand_id
_pdbx_poly_seq_scheme.pdb_ins_code
_pdbx_poly_seq_scheme.hetero
A 1 1 MET 1 11  ?   ?   ?   A . n
A 1 2 ALA 2 12  12  ALA ALA A . n
A 1 3 ARG 3 13  13  ARG ARG A . n
A 1 4 ASN 4 14  14  ASN ASN A . y
A 1 4 ASP 4 14  14  ASP ASP A . y
A 1 5 CYS 5 15  15  CYS CYS A . n
A 1 6 GLN 6 16  16  GLN GLN A . n
A 1 7 GLU 7 17  17  GLU GLU A . n
A 1 8 LYS 8 18  ?   ?   ?   A . n
B 1 1 GLY 1 101 101 GLY GLY B . n
B 1 2 HIS 2 102 102 HIS HIS B . n
B 1 3 ILE 3 103 ?   ?   ?   B . n
B 1 4 LEU 4 104 104 LEU LEU B . n
B 1 5 LYS 5 105 105 LYS LYS B . n
#
_struct_conf.conf_type_id HELX_P
_struct_conf.id HELX_P1
_struct_conf.pdbx_PDB_helix_id 1
_struct_conf.beg_label_comp_id ARG
_struct_conf.beg_label_asym_id A
_struct_conf.beg_label_seq_id 3
_struct_conf.pdbx_beg_PDB_ins_code ?
_struct_conf.end_label_comp_id CYS
_struct_conf.end_label_asym_id A
_struct_conf.end_label_seq_id 5
_struct_conf.pdbx_end_PDB_ins_code ?
_struct_conf.beg_auth_comp_id ARG
_struct_conf.beg_auth_asym_id A
_struct_conf.beg_auth_seq_id 13
_struct_conf.end_auth_comp_id CYS
_struct_conf.end_auth_asym_id A
_struct_conf.end_auth_seq_id 15
_struct_conf.pdbx_PDB_helix_class 1
_struct_conf.pdbx_PDB_helix_length 3
#
_struct_sheet.id AA
_struct_sheet.type ?
_struct_sheet.number_strands 2
#
_struct_sheet_order.sheet_id AA
_struct_sheet_order.range_id_1 1
_struct_sheet_order.range_id_2 2
_struct_sheet_order.offset ?
_struct_sheet_order.sense anti-parallel
#
loop_
_struct_sheet_range.sheet_id
_struct_sheet_range.id
_struct_sheet_range.beg_label_comp_id
_struct_sheet_range.beg_label_asym_id
_struct_sheet_range.beg_label_seq_id
_struct_sheet_range.pdbx_beg_PDB_ins_code
_struct_sheet_range.end_label_comp_id
_struct_sheet_range.end_label_asym_id
_struct_sheet_range.end_label_seq_id
_struct_sheet_range.pdbx_end_PDB_ins_code
_struct_sheet_range.beg_auth_comp_id
_struct_sheet_range.beg_auth_asym_id
_struct_sheet_range.beg_auth_seq_id
_struct_sheet_range.end_auth_comp_id
_struct_sheet_range.end_auth_asym_id
_struct_sheet_range.end_auth_seq_id
AA 1 GLN A 6 ? GLU A 7 ? GLN A 16  GLU A 17
AA 2 LEU B 4 ? LYS B 5 ? LEU B 104 LYS B 105
#
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.type_symbol
_atom_site.label_atom_id
_atom_site.label_alt_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_entity_id
_atom_site.label_seq_id
_atom_site.pdbx_PDB_ins_code
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
_atom_site.occupancy
_atom_site.B_iso_or_equiv
_atom_site.auth_seq_id
_atom_site.auth_comp_id
_atom_site.auth_asym_id
_atom_site.auth_atom_id
_atom_site.pdbx_PDB_model_num
ATOM   1  N N  . ALA A 1 2 ? 10.000 20.000 30.000 1.00 15.0 12  ALA A N  1
ATOM   2  C CA . ALA A 1 2 ? 11.000 21.000 31.000 1.00 16.0 12  ALA A CA 1
ATOM   3  C CA . ARG A 1 3 ? 12.000 22.000 32.000 1.00 17.0 13  ARG A CA 1
ATOM   4  C CA A ASN A 1 4 ? 13.000 23.000 33.000 0.50 18.0 14  ASN A CA 1
ATOM   5  C CA B ASP A 1 4 ? 13.100 23.100 33.100 0.50 18.0 14  ASP A CA 1
ATOM   6  C CA . CYS A 1 5 ? 14.000 24.000 34.000 1.00 19.0 15  CYS A CA 1
ATOM   7  C CA . GLN A 1 6 ? 15.000 25.000 35.000 1.00 20.0 16  GLN A CA 1
ATOM   8  C CA . GLU A 1 7 ? 16.000 26.000 36.000 1.00 21.0 17  GLU A CA 1
ATOM   9  C CA . GLY B 1 1 ? 20.000 20.000 20.000 1.00 15.0 101 GLY B CA 1
ATOM   10 C CA . HIS B 1 2 ? 21.000 21.000 21.000 1.00 15.0 102 HIS B CA 1
ATOM   11 C CA . LEU B 1 4 ? 23.000 23.000 23.000 1.00 15.0 104 LEU B CA 1
ATOM   12 C CA . LYS B 1 5 ? 24.000 24.000 24.000 1.00 15.0 105 LYS B CA 1
HETATM 13 O O  . HOH C 2 . ? 30.000 30.000 30.000 1.00 30.0 201 HOH B O  1
ATOM   14 C CA . ALA A 1 2 ? 11.500 21.500 31.500 1.00 16.0 12  ALA A CA 2
#
"#;
